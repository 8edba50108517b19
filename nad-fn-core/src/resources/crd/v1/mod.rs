pub mod networkattachmentdefinition;
