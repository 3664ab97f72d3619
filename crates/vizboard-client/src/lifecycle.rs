//! The visualisation lifecycle controller.
//!
//! Every operation reports `Requested`, then `Succeeded` or `Failed`, to the
//! injected [`EventSink`]. Server failures are never retried. Only `save`
//! rolls local state back when the server refuses a change.

use futures_util::future::join_all;
use vizboard_model::{Collection, Dataset, Status, Visualisation, VisualisationDraft, now_millis};
use vizboard_validate::resolve_dataset_ids;

use crate::api::VisualisationApi;
use crate::config::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_EXPORT_FORMAT};
use crate::error::{ClientError, Result};
use crate::event::{EventSink, LibraryEvent, Opener, Operation, SystemOpener, TracingSink};
use crate::library::Library;

/// How a dataset fetch reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Failures are returned to the caller.
    Foreground,
    /// Failures are logged and emitted, never returned.
    Background,
}

/// Drives visualisations through create, fetch, save, delete, export and share.
#[derive(Debug)]
pub struct LifecycleController<A, S = TracingSink, O = SystemOpener> {
    api: A,
    sink: S,
    opener: O,
    library: Library,
    app_origin: String,
    export_format: String,
}

impl<A: VisualisationApi> LifecycleController<A> {
    /// Controller that logs events and opens exports with the platform handler.
    pub fn with_defaults(api: A, settings: &ClientSettings) -> Self {
        Self::new(api, TracingSink, SystemOpener).configured(settings)
    }
}

impl<A, S, O> LifecycleController<A, S, O>
where
    A: VisualisationApi,
    S: EventSink,
    O: Opener,
{
    pub fn new(api: A, sink: S, opener: O) -> Self {
        Self {
            api,
            sink,
            opener,
            library: Library::new(),
            app_origin: DEFAULT_BASE_URL.to_string(),
            export_format: DEFAULT_EXPORT_FORMAT.to_string(),
        }
    }

    /// Take the app origin and export format from settings.
    #[must_use]
    pub fn configured(mut self, settings: &ClientSettings) -> Self {
        self.app_origin = settings.api.origin().to_string();
        self.export_format.clone_from(&settings.export.default_format);
        self
    }

    /// Start from an existing library instead of an empty one.
    #[must_use]
    pub fn with_library(mut self, library: Library) -> Self {
        self.library = library;
        self
    }

    #[must_use]
    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn opener(&self) -> &O {
        &self.opener
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Location of a visualisation in the web app.
    #[must_use]
    pub fn visualisation_location(&self, id: &str) -> String {
        format!("{}/visualisation/{id}", self.app_origin)
    }

    /// Load every visualisation the server knows.
    pub async fn list(&mut self) -> Result<usize> {
        self.sink.emit(LibraryEvent::requested(Operation::List, None));
        match self.api.list_visualisations().await {
            Ok(visualisations) => {
                let count = visualisations.len();
                for visualisation in visualisations {
                    self.library.put_visualisation(visualisation);
                }
                self.sink.emit(LibraryEvent::succeeded(Operation::List, None));
                Ok(count)
            }
            Err(err) => Err(self.fail(Operation::List, None, err)),
        }
    }

    /// Create a visualisation, optionally adding it to a collection, and
    /// navigate to it.
    ///
    /// A failure to update the collection is reported as its own event and
    /// does not fail the creation.
    pub async fn create(
        &mut self,
        draft: &VisualisationDraft,
        collection_id: Option<&str>,
    ) -> Result<Visualisation> {
        self.sink
            .emit(LibraryEvent::requested(Operation::Create, None));
        let created = match self.api.create_visualisation(draft).await {
            Ok(created) => created,
            Err(err) => return Err(self.fail(Operation::Create, None, err)),
        };

        let id = created.id.clone();
        self.library.put_visualisation(created.clone());
        self.sink
            .emit(LibraryEvent::succeeded(Operation::Create, Some(&id)));
        tracing::info!(id = %id, name = %created.name, "visualisation created");

        if let Some(collection_id) = collection_id {
            // reported through the sink already
            let _ = self
                .add_to_collection(collection_id, std::slice::from_ref(&id))
                .await;
        }

        self.sink.emit(LibraryEvent::Navigate {
            path: format!("/visualisation/{id}"),
        });
        Ok(created)
    }

    /// Append entity ids to a collection, skipping ids already present.
    pub async fn add_to_collection(&mut self, collection_id: &str, ids: &[String]) -> Result<()> {
        self.sink.emit(LibraryEvent::requested(
            Operation::AddToCollection,
            Some(collection_id),
        ));
        match self.merge_into_collection(collection_id, ids).await {
            Ok(collection) => {
                self.library.put_collection(collection);
                self.sink.emit(LibraryEvent::succeeded(
                    Operation::AddToCollection,
                    Some(collection_id),
                ));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::AddToCollection, Some(collection_id), err)),
        }
    }

    async fn merge_into_collection(&self, collection_id: &str, ids: &[String]) -> Result<Collection> {
        let mut collection = self.api.fetch_collection(collection_id).await?;
        if collection.add_entities(ids.iter().cloned()) {
            self.api.update_collection(&collection).await?;
        } else {
            tracing::debug!(collection = %collection_id, "collection already holds every id");
        }
        Ok(collection)
    }

    /// Fetch a visualisation together with every dataset it depends on.
    ///
    /// Dataset fetches run concurrently in background mode: one failing does
    /// not fail the visualisation.
    pub async fn fetch(&mut self, id: &str) -> Result<Visualisation> {
        self.sink
            .emit(LibraryEvent::requested(Operation::Fetch, Some(id)));
        let visualisation = match self.api.fetch_visualisation(id).await {
            Ok(visualisation) => visualisation,
            Err(err) => return Err(self.fail(Operation::Fetch, Some(id), err)),
        };

        let dataset_ids: Vec<String> = resolve_dataset_ids(&visualisation).into_iter().collect();
        self.fetch_datasets_in_background(&dataset_ids).await;

        self.library.put_visualisation(visualisation.clone());
        self.library.loaded.insert(id.to_string());
        self.sink
            .emit(LibraryEvent::succeeded(Operation::Fetch, Some(id)));
        Ok(visualisation)
    }

    /// Fetch one dataset and store it.
    ///
    /// Returns `Ok(None)` when a background fetch failed.
    pub async fn fetch_dataset(&mut self, id: &str, mode: FetchMode) -> Result<Option<&Dataset>> {
        self.sink
            .emit(LibraryEvent::requested(Operation::FetchDataset, Some(id)));
        let result = self.api.fetch_dataset(id).await;
        match self.store_dataset(id, result) {
            Ok(()) => Ok(self.library.datasets.get(id)),
            Err(err) if mode == FetchMode::Background => {
                tracing::warn!(dataset = %id, error = %err, "background dataset fetch failed");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch_datasets_in_background(&mut self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        tracing::debug!(count = ids.len(), "fetching datasets");
        for id in ids {
            self.sink
                .emit(LibraryEvent::requested(Operation::FetchDataset, Some(id)));
        }

        let api = &self.api;
        let results = join_all(ids.iter().map(|id| api.fetch_dataset(id))).await;

        for (id, result) in ids.iter().zip(results) {
            if let Err(err) = self.store_dataset(id, result) {
                tracing::warn!(dataset = %id, error = %err, "background dataset fetch failed");
            }
        }
    }

    fn store_dataset(&mut self, id: &str, result: Result<Dataset>) -> Result<()> {
        match result {
            Ok(mut dataset) => {
                if dataset.id.is_empty() {
                    dataset.id = id.to_string();
                }
                self.library.put_dataset(dataset);
                self.sink
                    .emit(LibraryEvent::succeeded(Operation::FetchDataset, Some(id)));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::FetchDataset, Some(id), err)),
        }
    }

    /// Save an edited visualisation.
    ///
    /// The edit is stored as `PENDING` right away. If the server refuses it,
    /// the previous local copy is restored exactly, or the entry is removed
    /// when there was none. Every copy written to the library is also sent to
    /// the sink, so the optimistic state is visible while the request runs.
    pub async fn save(&mut self, visualisation: &Visualisation) -> Result<()> {
        let id = visualisation.id.clone();
        let previous = self.library.visualisation(&id).cloned();

        self.sink
            .emit(LibraryEvent::requested(Operation::Save, Some(&id)));
        self.store(visualisation.stamped(Status::Pending, now_millis()));

        match self.api.update_visualisation(visualisation).await {
            Ok(()) => {
                self.store(visualisation.stamped(Status::Ok, now_millis()));
                self.sink
                    .emit(LibraryEvent::succeeded(Operation::Save, Some(&id)));
                Ok(())
            }
            Err(err) => {
                match previous {
                    Some(previous) => self.store(previous),
                    None => {
                        self.library.visualisations.remove(&id);
                        self.sink.emit(LibraryEvent::Discarded { id: id.clone() });
                    }
                }
                Err(self.fail(Operation::Save, Some(&id), err))
            }
        }
    }

    fn store(&mut self, visualisation: Visualisation) {
        self.library.put_visualisation(visualisation.clone());
        self.sink.emit(LibraryEvent::stored(visualisation));
    }

    /// Delete a visualisation and remove it from every dashboard.
    ///
    /// The id stays marked as deleting when the server refuses.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.sink
            .emit(LibraryEvent::requested(Operation::Delete, Some(id)));
        self.library.deleting.insert(id.to_string());

        match self.api.delete_visualisation(id).await {
            Ok(()) => {
                self.library.remove_visualisation(id);
                self.sink
                    .emit(LibraryEvent::succeeded(Operation::Delete, Some(id)));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Delete, Some(id), err)),
        }
    }

    /// Export a visualisation and open the resulting file.
    ///
    /// Fails before any request when `id` is `None`. `format` defaults to the
    /// configured export format.
    pub async fn export(&mut self, id: Option<&str>, format: Option<&str>) -> Result<String> {
        let id = id.ok_or(ClientError::MissingTarget("export"))?;
        let format = format.unwrap_or(self.export_format.as_str()).to_string();
        let target = self.visualisation_location(id);

        self.sink
            .emit(LibraryEvent::requested(Operation::Export, Some(id)));
        let exported = match self.api.export(&format, &target).await {
            Ok(exported) => exported,
            Err(err) => return Err(self.fail(Operation::Export, Some(id), err)),
        };

        if let Err(err) = self.opener.open(&exported.file) {
            let err = ClientError::Open {
                url: exported.file,
                reason: err.to_string(),
            };
            return Err(self.fail(Operation::Export, Some(id), err));
        }
        self.sink
            .emit(LibraryEvent::succeeded(Operation::Export, Some(id)));
        tracing::info!(id = %id, %format, file = %exported.file, "visualisation exported");
        Ok(exported.file)
    }

    /// Fetch a share id for a visualisation. Does nothing when `id` is `None`.
    pub async fn fetch_share_id(&mut self, id: Option<&str>) -> Result<Option<String>> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.sink
            .emit(LibraryEvent::requested(Operation::Share, Some(id)));
        match self.api.create_share(id).await {
            Ok(share) => {
                self.library
                    .shares
                    .insert(id.to_string(), share.id.clone());
                self.sink
                    .emit(LibraryEvent::succeeded(Operation::Share, Some(id)));
                Ok(Some(share.id))
            }
            Err(err) => Err(self.fail(Operation::Share, Some(id), err)),
        }
    }

    fn fail(&mut self, operation: Operation, id: Option<&str>, err: ClientError) -> ClientError {
        tracing::warn!(%operation, id, error = %err, "request failed");
        self.sink.emit(LibraryEvent::failed(operation, id, &err));
        err
    }
}
