use std::any::type_name;

#[cfg(test)]
use kube::core::object::HasStatus;
use kube::Resource;

pub fn pretty_type_name<'a, T>() -> &'a str {
    let name = type_name::<T>();

    name.rsplit("::").next().unwrap_or(name)
}

pub trait RequireMetadata<E> {
    fn require_name_or_else(&self, error: impl FnOnce() -> E) -> Result<&str, E>;
}

impl<T: Resource, E> RequireMetadata<E> for T {
    fn require_name_or_else(&self, error: impl FnOnce() -> E) -> Result<&str, E> {
        Ok(self
            .meta()
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(error)?)
    }
}

#[cfg(test)]
pub trait FromStatus<S> {
    fn from_status(status: S) -> Self;
}

#[cfg(test)]
impl<T: Default + HasStatus<Status = S>, S> FromStatus<S> for T {
    fn from_status(status: S) -> Self {
        let mut object = Self::default();

        *object.status_mut() = Some(status);

        object
    }
}
