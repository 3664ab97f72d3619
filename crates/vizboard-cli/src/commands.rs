use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use vizboard_cli::rules::build_mappings;
use vizboard_client::{
    ClientSettings, HttpApi, LifecycleController, Opener, TracingSink, dashboard_list,
};
use vizboard_model::{Column, Dashboard, Dataset, DatasetMap, Visualisation};
use vizboard_transform::derive_category::{
    MappingKind, dataset_needs_rows, value_occurrences,
};
use vizboard_transform::{DeriveCategorySession, SubmitOutcome, TransformationDescriptor};
use vizboard_validate::{
    Readiness, ViewerFrame, missing_dataset_ids, render_readiness, resolve_dataset_ids,
    spec_is_valid_for_api, viewer_frame,
};

use crate::cli::{CheckArgs, DeriveCategoryArgs, DepsArgs, ExportArgs, ListArgs};
use crate::summary::{
    print_check_report, print_dependencies, print_fetch_report, print_visualisation_list,
};

/// Opens exported files, or only reports them with `--no-open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliOpener {
    System,
    PrintOnly,
}

impl Opener for CliOpener {
    fn open(&mut self, url: &str) -> std::io::Result<()> {
        match self {
            Self::System => vizboard_client::SystemOpener.open(url),
            Self::PrintOnly => {
                debug!(url, "not opening export");
                Ok(())
            }
        }
    }
}

pub type Controller = LifecycleController<HttpApi, TracingSink, CliOpener>;

/// Settings file plus command-line overrides.
pub fn load_settings(config: Option<&Path>, base_url: Option<&str>) -> Result<ClientSettings> {
    let mut settings = match config {
        Some(path) => ClientSettings::try_load_from(path)
            .with_context(|| format!("read settings from {}", path.display()))?,
        None => ClientSettings::load(),
    };
    if let Some(base_url) = base_url {
        settings.api.base_url = base_url.to_string();
    }
    debug!(base_url = %settings.api.base_url, "settings loaded");
    Ok(settings)
}

pub fn build_controller(settings: &ClientSettings, opener: CliOpener) -> Result<Controller> {
    let api = HttpApi::new(&settings.api.base_url).context("create API client")?;
    Ok(LifecycleController::new(api, TracingSink, opener).configured(settings))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

fn read_datasets(paths: &[PathBuf]) -> Result<DatasetMap> {
    let mut datasets = DatasetMap::new();
    for path in paths {
        let mut dataset: Dataset = read_json(path)?;
        if dataset.id.is_empty() {
            dataset.id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        datasets.insert(dataset.id.clone(), dataset);
    }
    Ok(datasets)
}

/// Everything `check` reports about one visualisation.
#[derive(Debug)]
pub struct CheckReport {
    pub visualisation: Visualisation,
    pub readiness: Readiness,
    pub persistable: bool,
    pub frame: ViewerFrame,
    pub dependencies: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let visualisation: Visualisation = read_json(&args.visualisation)?;
    let datasets = read_datasets(&args.datasets)?;
    let span = info_span!("check", visualisation = %visualisation.id);
    let _guard = span.enter();

    let report = CheckReport {
        readiness: render_readiness(&visualisation, &datasets),
        persistable: spec_is_valid_for_api(&visualisation.spec, &visualisation.visualisation_type),
        frame: viewer_frame(
            &visualisation.visualisation_type,
            None,
            None,
            args.window_height,
        ),
        dependencies: resolve_dataset_ids(&visualisation),
        missing: missing_dataset_ids(&visualisation, &datasets),
        visualisation,
    };
    print_check_report(&report);
    Ok(report)
}

pub fn run_deps(args: &DepsArgs) -> Result<()> {
    let visualisation: Visualisation = read_json(&args.visualisation)?;
    print_dependencies(&resolve_dataset_ids(&visualisation));
    Ok(())
}

pub async fn run_list(controller: &mut Controller, args: &ListArgs) -> Result<()> {
    let count = controller.list().await.context("list visualisations")?;
    info!(count, "visualisations listed");

    let dashboard: Dashboard = match &args.dashboard {
        Some(path) => read_json(path)?,
        None => Dashboard::default(),
    };
    let library = controller.library();
    let visualisations: Vec<Visualisation> = library.visualisations.values().cloned().collect();
    let list = dashboard_list(&visualisations, &dashboard, &library.datasets, &args.filter);
    print_visualisation_list(&list);
    Ok(())
}

pub async fn run_fetch(controller: &mut Controller, id: &str) -> Result<Readiness> {
    let visualisation = controller
        .fetch(id)
        .await
        .with_context(|| format!("fetch visualisation {id}"))?;
    let library = controller.library();
    let readiness = render_readiness(&visualisation, library);
    print_fetch_report(&visualisation, &readiness, library);
    Ok(readiness)
}

pub async fn run_save(controller: &mut Controller, path: &Path) -> Result<()> {
    let visualisation: Visualisation = read_json(path)?;
    if !spec_is_valid_for_api(&visualisation.spec, &visualisation.visualisation_type) {
        bail!(
            "visualisation {} is missing required spec fields for a {}",
            visualisation.id,
            visualisation.visualisation_type
        );
    }
    controller
        .save(&visualisation)
        .await
        .with_context(|| format!("save visualisation {}", visualisation.id))?;
    println!("Saved {}", visualisation.id);
    Ok(())
}

pub async fn run_delete(controller: &mut Controller, id: &str) -> Result<()> {
    controller
        .delete(id)
        .await
        .with_context(|| format!("delete visualisation {id}"))?;
    println!("Deleted {id}");
    Ok(())
}

pub async fn run_export(controller: &mut Controller, args: &ExportArgs) -> Result<()> {
    let file = controller
        .export(args.id.as_deref(), args.format.as_deref())
        .await
        .context("export visualisation")?;
    println!("{file}");
    Ok(())
}

pub async fn run_share(controller: &mut Controller, id: &str) -> Result<()> {
    let share = controller
        .fetch_share_id(Some(id))
        .await
        .with_context(|| format!("share visualisation {id}"))?;
    if let Some(share) = share {
        println!("{share}");
    }
    Ok(())
}

/// Build a derive-category descriptor. Returns `None` when the rules were
/// refused; the reason has been printed.
pub fn run_derive_category(args: &DeriveCategoryArgs) -> Result<Option<TransformationDescriptor>> {
    let datasets = read_datasets(std::slice::from_ref(&args.dataset))?;
    let Some(dataset) = datasets.values().next() else {
        bail!("no dataset in {}", args.dataset.display());
    };
    let column: Column = dataset
        .column(&args.column)
        .cloned()
        .with_context(|| format!("column `{}` not found", args.column))?;
    let kind = MappingKind::for_column_type(&column.column_type)?;
    if kind == MappingKind::Text && dataset_needs_rows(&datasets, &dataset.id) {
        bail!(
            "dataset `{}` has no rows; text rules are matched against its values",
            dataset.id
        );
    }
    let occurrences = value_occurrences(dataset, &column.column_name).unwrap_or_default();

    let mut session = DeriveCategorySession::new(dataset.id.clone());
    session.select_source_column(column)?;
    session.set_target_title(args.title.clone())?;
    session.set_fallback(Some(args.fallback.clone()))?;
    session.set_mappings(build_mappings(kind, &args.rules, &occurrences)?)?;

    match session.submit()? {
        SubmitOutcome::Submitted(descriptor) => {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            Ok(Some(descriptor))
        }
        SubmitOutcome::Refused(notification) => {
            eprintln!("{}", notification.message);
            Ok(None)
        }
    }
}
