// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use pattrn_app_core::SettingsService;
use pattrn_config_fs::FsConfigStore;
use pattrn_core::variables::{count_rows_with_data, VariableSchema};
use pattrn_core::{
    classify, ClickOutcome, Dataset, DisplaySettings, Layer, MapView, VariableDescriptor,
};
use pattrn_map_port::MarkerId;
use tracing::info;

use crate::cli::{Cli, Command, OutputFormat, SourceArgs};
use crate::host::{BufferedPanel, DetachedSurface};

/// Dispatch the parsed command, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let settings = SettingsService::new(open_store(cli.config_dir.as_deref())?);
    match &cli.command {
        Command::Classify { source, format } => run_classify(&settings, source, *format, out),
        Command::Markers { source } => run_markers(&settings, source, out),
        Command::Inspect { source, index } => run_inspect(&settings, source, *index, out),
    }
}

fn open_store(dir: Option<&Path>) -> Result<FsConfigStore> {
    match dir {
        Some(dir) => Ok(FsConfigStore::at(dir)),
        None => FsConfigStore::user_default().context("resolving user config dir"),
    }
}

struct Source {
    display: DisplaySettings,
    layer: Layer,
}

fn load_source(settings: &SettingsService<FsConfigStore>, args: &SourceArgs) -> Result<Source> {
    let metadata = settings.metadata().context("loading dataset metadata")?;
    let text = fs::read_to_string(&args.dataset)
        .with_context(|| format!("reading {}", args.dataset.display()))?;
    let dataset = Dataset::from_json(&text, &metadata)
        .with_context(|| format!("parsing {}", args.dataset.display()))?;
    let variables = match &args.schema {
        Some(path) => read_schema(path)?,
        None => Vec::new(),
    };
    let (group, data) = settings
        .layer(&args.group, &args.layer)
        .context("resolving layer")?;
    let display = settings
        .display_settings()
        .context("loading display settings")?;
    info!(
        records = dataset.records.len(),
        skipped = dataset.skipped,
        variables = variables.len(),
        "source loaded"
    );
    Ok(Source {
        display,
        layer: Layer::new(group, data, dataset, variables),
    })
}

fn read_schema(path: &Path) -> Result<Vec<VariableDescriptor>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let schema: VariableSchema = serde_json::from_str(&text)
        .with_context(|| format!("parsing schema {}", path.display()))?;
    Ok(schema.into_descriptors())
}

fn headless_view(source: Source) -> MapView<BufferedPanel, DetachedSurface> {
    let mut view = MapView::new(
        source.display,
        BufferedPanel::default(),
        DetachedSurface::default(),
    );
    view.load_layer(source.layer);
    view
}

fn run_classify(
    settings: &SettingsService<FsConfigStore>,
    args: &SourceArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let Source { layer, .. } = load_source(settings, args)?;
    let groups = classify(&layer.variables, &layer.records);

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &groups)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Type", "Field", "Label", "Rows with data"]);
            for group in &groups {
                for name in &group.names {
                    let label = layer
                        .variables
                        .iter()
                        .find(|v| &v.id == name)
                        .map_or(name.as_str(), VariableDescriptor::label);
                    table.add_row(vec![
                        format!("{:?}", group.kind).to_lowercase(),
                        name.clone(),
                        label.to_owned(),
                        count_rows_with_data(&layer.records, name).to_string(),
                    ]);
                }
            }
            writeln!(out, "{table}")?;
        }
    }
    Ok(())
}

fn run_markers(
    settings: &SettingsService<FsConfigStore>,
    args: &SourceArgs,
    out: &mut impl Write,
) -> Result<()> {
    let view = headless_view(load_source(settings, args)?);
    info!(placed = view.surface().placed(), "markers built");
    serde_json::to_writer_pretty(&mut *out, view.markers())?;
    writeln!(out)?;
    Ok(())
}

fn run_inspect(
    settings: &SettingsService<FsConfigStore>,
    args: &SourceArgs,
    index: usize,
    out: &mut impl Write,
) -> Result<()> {
    let mut view = headless_view(load_source(settings, args)?);
    let marker = MarkerId(index);
    match view.click(marker) {
        ClickOutcome::Selected => {}
        ClickOutcome::Ignored => bail!(
            "no record at index {index} ({} records loaded)",
            view.markers().len()
        ),
        // No chart is attached to a headless view.
        ClickOutcome::FilterCleared => bail!("record {index} was filtered out by the chart"),
    }

    let rows = view.detail_rows(marker).unwrap_or_default();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);
    for row in &rows {
        table.add_row(vec![row.label.as_str(), row.value.as_str()]);
    }
    writeln!(out, "{table}")?;

    for (region, html) in view.view().filled() {
        writeln!(out)?;
        writeln!(out, "[{}]", region.anchor_id())?;
        writeln!(out, "{html}")?;
    }
    Ok(())
}
