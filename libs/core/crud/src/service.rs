//! Generic CRUD service shared by every resource

use std::marker::PhantomData;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CrudError, CrudResult};
use crate::repository::CrudRepository;
use crate::resource::Resource;

/// Existence checks, validation and copy-on-update over a [`CrudRepository`].
pub struct CrudService<T, R> {
    repository: Arc<R>,
    _resource: PhantomData<fn() -> T>,
}

impl<T, R> CrudService<T, R>
where
    T: Resource,
    R: CrudRepository<T>,
{
    pub fn new(repository: R) -> Self {
        Self::from_arc(Arc::new(repository))
    }

    pub fn from_arc(repository: Arc<R>) -> Self {
        Self {
            repository,
            _resource: PhantomData,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    #[instrument(skip_all, fields(resource = T::NAME, id = %id))]
    pub async fn exists(&self, id: &T::Id) -> CrudResult<bool> {
        Ok(self.find(id).await?.is_some())
    }

    /// Fails with `ERR:RESOURCE:01` when `id` is absent.
    pub async fn check_exists(&self, id: &T::Id) -> CrudResult<()> {
        if !self.exists(id).await? {
            return Err(CrudError::not_found(T::NAME, id));
        }
        Ok(())
    }

    /// Fails with `ERR:RESOURCE:02` when `id` is present.
    pub async fn check_doesnt_exist(&self, id: &T::Id) -> CrudResult<()> {
        if self.exists(id).await? {
            return Err(CrudError::already_exists(T::NAME, id));
        }
        Ok(())
    }

    pub async fn find(&self, id: &T::Id) -> CrudResult<Option<T>> {
        self.repository.find_by_id(id).await
    }

    /// Like [`find`](Self::find) but a miss is `NotFound`.
    pub async fn get(&self, id: &T::Id) -> CrudResult<T> {
        self.find(id)
            .await?
            .ok_or_else(|| CrudError::not_found(T::NAME, id))
    }

    #[instrument(skip_all, fields(resource = T::NAME))]
    pub async fn find_all(&self) -> CrudResult<Vec<T>> {
        self.repository.find_all().await
    }

    /// Check every declared constraint, reporting all violations together.
    pub fn validate(&self, element: &T) -> CrudResult<()> {
        element.validate().map_err(|errors| {
            tracing::debug!(resource = T::NAME, %errors, "Validation failed");
            CrudError::Validation(errors)
        })
    }

    #[instrument(skip_all, fields(resource = T::NAME, id = %element.id()))]
    pub async fn save(&self, element: T) -> CrudResult<T> {
        self.validate(&element)?;
        let saved = self.repository.save(element).await?;
        tracing::info!("Resource saved");
        Ok(saved)
    }

    /// Copy every field of `element` onto the record stored under `id`,
    /// then validate and persist. The stored key is kept.
    #[instrument(skip_all, fields(resource = T::NAME, id = %id))]
    pub async fn update(&self, id: &T::Id, element: T) -> CrudResult<T> {
        let mut stored = self.get(id).await?;
        stored.copy_from(element);
        self.save(stored).await
    }

    pub async fn delete(&self, element: &T) -> CrudResult<()> {
        self.delete_by_id(&element.id()).await
    }

    #[instrument(skip_all, fields(resource = T::NAME, id = %id))]
    pub async fn delete_by_id(&self, id: &T::Id) -> CrudResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!("Resource deleted");
        Ok(())
    }

    /// Save a default element for `id`.
    pub async fn create(&self, id: T::Id) -> CrudResult<T> {
        self.save(T::build(id)).await
    }

    /// Create with a generated identifier. Resources without an identifier
    /// strategy fail with `ERR:RESOURCE:03`.
    pub async fn create_generated(&self) -> CrudResult<T> {
        let id = T::generate_id().ok_or(CrudError::IdRequired { resource: T::NAME })?;
        self.create(id).await
    }
}

impl<T, R> Clone for CrudService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            _resource: PhantomData,
        }
    }
}
