// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Selection state machine for one map view.
//!
//! A [`MapView`] owns the loaded layer, its markers and the single selection
//! slot. Hosts forward marker clicks and popup-close events to it; every
//! transition takes `&mut self`, so a second click cannot interleave with one
//! in progress. All panel output goes through the injected
//! [`DetailPanelView`], all marker restyling through the [`MapSurface`].
//!
//! ```text
//!   Idle --click--> Selected --click(other)--> Selected
//!     ^                 |
//!     +---popup close---+
//! ```

use pattrn_map_port::{
    ChartFilter, DetailPanelView, LinkFetcher, LinkTicket, MapSurface, MarkerId, MarkerStyle,
    PanelRegion,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::dataset::{DataSourceKind, Dataset};
use crate::gallery::{edit_link_html, link_html, photo_html, video_html};
use crate::marker::{build_marker, LayerContext, MarkerDescriptor};
use crate::record::{MediaSource, Record};
use crate::settings::{DatasetPalette, Environment, InstanceSettings, LayerData, LayerGroup};
use crate::style::{highlight_style, resolve_style};
use crate::table::{assemble_rows, Diagnostics, TableRow};
use crate::variables::{Classification, ClassifierCache, VariableDescriptor};

/// Event details placeholder shown while nothing is selected.
pub const DETAILS_PLACEHOLDER: &str =
    "<p style='padding-top:15px'>Please click a marker<br><br></p>";

/// Event summary placeholder shown while nothing is selected.
pub const SUMMARY_PLACEHOLDER: &str = "<p>This panel will update when a marker is clicked</p>";

/// Regions holding per-selection content; emptied before every selection.
const TRANSIENT_REGIONS: [PanelRegion; 5] = [
    PanelRegion::ImageGallery,
    PanelRegion::VideoGallery,
    PanelRegion::SummaryTable,
    PanelRegion::Urls,
    PanelRegion::EditLink,
];

/// Settings that drive marker styling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySettings {
    /// Instance settings.
    pub instance: InstanceSettings,
    /// Dataset membership palette.
    pub palette: DatasetPalette,
}

/// One data layer ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Owning group.
    pub group: LayerGroup,
    /// Data layer.
    pub data: LayerData,
    /// Source layout.
    pub source: DataSourceKind,
    /// Records.
    pub records: Vec<Record>,
    /// Schema.
    pub variables: Vec<VariableDescriptor>,
    /// Caller-supplied version used to key the classification cache.
    pub dataset_version: u64,
}

impl Layer {
    /// Layer over a loaded dataset.
    pub fn new(
        group: LayerGroup,
        data: LayerData,
        dataset: Dataset,
        variables: Vec<VariableDescriptor>,
    ) -> Self {
        Self {
            group,
            data,
            source: dataset.kind,
            records: dataset.records,
            variables,
            dataset_version: 0,
        }
    }

    /// Set the dataset version.
    pub fn with_version(mut self, dataset_version: u64) -> Self {
        self.dataset_version = dataset_version;
        self
    }

    fn reindex(&mut self) {
        for (index, record) in self.records.iter_mut().enumerate() {
            record.index = index;
        }
    }
}

/// The selection slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    /// Nothing selected.
    Idle,
    /// One marker selected.
    Selected {
        /// Selected marker.
        marker: MarkerId,
        /// Highlight style applied to it.
        applied: MarkerStyle,
        /// Link load still outstanding for this selection.
        links: Option<LinkTicket>,
    },
}

/// Result of a marker click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The marker is now selected and the panel populated.
    Selected,
    /// The chart was filtered to this record; the filter was removed instead.
    FilterCleared,
    /// No such marker in the loaded layer.
    Ignored,
}

#[derive(Debug)]
struct LoadedLayer {
    layer: Layer,
    classification: Classification,
    markers: Vec<MarkerDescriptor>,
}

/// Map view: loaded layer, markers, selection, and the host ports.
pub struct MapView<V, S> {
    settings: DisplaySettings,
    view: V,
    surface: S,
    chart: Option<Box<dyn ChartFilter>>,
    links: Option<Box<dyn LinkFetcher>>,
    layer: Option<LoadedLayer>,
    cache: ClassifierCache,
    selection: SelectionState,
    last_ticket: u64,
}

impl<V, S> MapView<V, S>
where
    V: DetailPanelView,
    S: MapSurface,
{
    /// Map view with no layer loaded.
    pub fn new(settings: DisplaySettings, view: V, surface: S) -> Self {
        Self {
            settings,
            view,
            surface,
            chart: None,
            links: None,
            layer: None,
            cache: ClassifierCache::default(),
            selection: SelectionState::Idle,
            last_ticket: 0,
        }
    }

    /// Attach a chart filter collaborator.
    pub fn with_chart(mut self, chart: impl ChartFilter + 'static) -> Self {
        self.chart = Some(Box::new(chart));
        self
    }

    /// Load links asynchronously through `fetcher` instead of inline.
    pub fn with_link_fetcher(mut self, fetcher: impl LinkFetcher + 'static) -> Self {
        self.links = Some(Box::new(fetcher));
        self
    }

    /// Panel port.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Map surface port.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current settings.
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Selection slot.
    pub fn state(&self) -> &SelectionState {
        &self.selection
    }

    /// Selected marker, if any.
    pub fn selected(&self) -> Option<MarkerId> {
        match self.selection {
            SelectionState::Selected { marker, .. } => Some(marker),
            SelectionState::Idle => None,
        }
    }

    /// Loaded layer.
    pub fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref().map(|l| &l.layer)
    }

    /// Markers of the loaded layer, indexed by record.
    pub fn markers(&self) -> &[MarkerDescriptor] {
        self.layer
            .as_ref()
            .map(|l| l.markers.as_slice())
            .unwrap_or_default()
    }

    /// Classification of the loaded layer.
    pub fn classification(&self) -> Option<&Classification> {
        self.layer.as_ref().map(|l| &l.classification)
    }

    /// Replace the loaded layer.
    ///
    /// Any selection is closed first. The new records are reindexed from
    /// zero, classified, and their markers placed on the surface.
    pub fn load_layer(&mut self, mut layer: Layer) {
        self.popup_closed();
        layer.reindex();
        let classification = self
            .cache
            .classify(
                &layer.data.id,
                layer.dataset_version,
                &layer.variables,
                &layer.records,
            )
            .clone();
        let markers = build_markers(&layer, &self.settings);

        self.surface.clear_markers();
        for marker in &markers {
            self.surface.place_marker(
                marker.id,
                marker.position,
                &marker.style,
                marker.class_name.as_str(),
            );
        }
        info!(
            group = %layer.group.id,
            layer = %layer.data.id,
            markers = markers.len(),
            groups = classification.groups.len(),
            "layer loaded"
        );
        self.layer = Some(LoadedLayer {
            layer,
            classification,
            markers,
        });
    }

    /// Swap the dataset membership palette and restyle resting markers.
    ///
    /// The selected marker keeps its highlight; it picks up the new palette
    /// when deselected.
    pub fn set_palette(&mut self, palette: DatasetPalette) {
        self.settings.palette = palette;
        let selected = self.selected();
        let Some(loaded) = self.layer.as_mut() else {
            return;
        };
        loaded.markers = build_markers(&loaded.layer, &self.settings);
        for marker in loaded.markers.iter().filter(|m| Some(m.id) != selected) {
            self.surface.set_marker_style(marker.id, &marker.style);
        }
    }

    /// Handle a click on a marker.
    pub fn click(&mut self, marker: MarkerId) -> ClickOutcome {
        let known = self
            .layer
            .as_ref()
            .is_some_and(|l| marker.0 < l.layer.records.len());
        if !known {
            warn!(marker = marker.0, "click on unknown marker");
            return ClickOutcome::Ignored;
        }

        // Implicit popup close of the previous selection.
        let closed = match std::mem::replace(&mut self.selection, SelectionState::Idle) {
            SelectionState::Selected {
                marker: previous, ..
            } => {
                self.restore_marker(previous);
                true
            }
            SelectionState::Idle => false,
        };

        for region in TRANSIENT_REGIONS {
            clear_region(&mut self.view, region);
        }
        self.view.activate_details();

        if let Some(chart) = self.chart.as_mut() {
            if chart.filtered_index() == Some(marker.0) {
                chart.clear_filter();
                debug!(marker = marker.0, "chart filter cleared");
                if closed {
                    self.show_placeholders();
                }
                return ClickOutcome::FilterCleared;
            }
        }

        let Some(loaded) = self.layer.as_ref() else {
            return ClickOutcome::Ignored;
        };
        let (Some(record), Some(descriptor)) = (
            loaded.layer.records.get(marker.0),
            loaded.markers.get(marker.0),
        ) else {
            return ClickOutcome::Ignored;
        };

        if let (Some(url), Some(id)) = (
            self.settings.instance.script_url.as_deref(),
            record.event_id.as_deref(),
        ) {
            append_region(&mut self.view, PanelRegion::EditLink, &edit_link_html(url, id));
        }

        populate(
            &mut self.view,
            PanelRegion::ImageGallery,
            record.photos.as_ref(),
            photo_html,
        );
        populate(
            &mut self.view,
            PanelRegion::VideoGallery,
            record.videos.as_ref(),
            video_html,
        );

        let pending_links = match (record.links.as_ref(), self.links.as_mut()) {
            (Some(_), Some(fetcher)) => {
                self.last_ticket += 1;
                let ticket = LinkTicket(self.last_ticket);
                fetcher.request_links(ticket, record.index);
                Some(ticket)
            }
            (Some(source), None) => {
                populate(&mut self.view, PanelRegion::Urls, Some(source), link_html);
                None
            }
            (None, _) => None,
        };

        replace_region(
            &mut self.view,
            PanelRegion::EventDetails,
            &descriptor.content.details_html(),
        );
        replace_region(
            &mut self.view,
            PanelRegion::EventSummary,
            &descriptor.content.summary_html(),
        );

        let diagnostics = (self.settings.instance.environment == Environment::Development).then(
            || Diagnostics {
                layer_group: &loaded.layer.group.id,
                layer_data: &loaded.layer.data.id,
            },
        );
        let rows = assemble_rows(
            record,
            &loaded.classification,
            loaded.layer.source,
            diagnostics,
        );
        for row in &rows {
            if !append_region(&mut self.view, PanelRegion::SummaryTable, &row.to_html()) {
                break;
            }
        }

        let applied = highlight_style(&self.settings.instance);
        self.surface.set_marker_style(marker, &applied);
        self.surface.open_popup(marker, record.position);
        debug!(marker = marker.0, rows = rows.len(), "marker selected");

        self.selection = SelectionState::Selected {
            marker,
            applied,
            links: pending_links,
        };
        ClickOutcome::Selected
    }

    /// Handle the map's popup-close event.
    ///
    /// Returns `false` when nothing was selected.
    pub fn popup_closed(&mut self) -> bool {
        let SelectionState::Selected { marker, .. } =
            std::mem::replace(&mut self.selection, SelectionState::Idle)
        else {
            return false;
        };
        self.restore_marker(marker);
        self.show_placeholders();
        for region in TRANSIENT_REGIONS {
            clear_region(&mut self.view, region);
        }
        debug!(marker = marker.0, "marker deselected");
        true
    }

    fn show_placeholders(&mut self) {
        replace_region(&mut self.view, PanelRegion::EventDetails, DETAILS_PLACEHOLDER);
        replace_region(&mut self.view, PanelRegion::EventSummary, SUMMARY_PLACEHOLDER);
    }

    /// Deliver a finished link load.
    ///
    /// Only the ticket of the current selection is honoured; anything else
    /// belongs to a selection that has since changed or closed and is dropped.
    pub fn complete_links(&mut self, ticket: LinkTicket) -> bool {
        let marker = match &mut self.selection {
            SelectionState::Selected { marker, links, .. } if *links == Some(ticket) => {
                *links = None;
                *marker
            }
            _ => {
                debug!(ticket = ticket.0, "discarding stale link result");
                return false;
            }
        };
        let Some(source) = self
            .layer
            .as_ref()
            .and_then(|l| l.layer.records.get(marker.0))
            .and_then(|r| r.links.as_ref())
        else {
            return false;
        };
        populate(&mut self.view, PanelRegion::Urls, Some(source), link_html);
        true
    }

    /// Table rows a selection of `marker` would show.
    pub fn detail_rows(&self, marker: MarkerId) -> Option<Vec<TableRow>> {
        let loaded = self.layer.as_ref()?;
        let record = loaded.layer.records.get(marker.0)?;
        let diagnostics = (self.settings.instance.environment == Environment::Development).then(
            || Diagnostics {
                layer_group: &loaded.layer.group.id,
                layer_data: &loaded.layer.data.id,
            },
        );
        Some(assemble_rows(
            record,
            &loaded.classification,
            loaded.layer.source,
            diagnostics,
        ))
    }

    /// Put a marker back to its resting style, recomputed from the current
    /// palette and settings.
    fn restore_marker(&mut self, marker: MarkerId) {
        let Some(loaded) = self.layer.as_ref() else {
            return;
        };
        let Some(record) = loaded.layer.records.get(marker.0) else {
            return;
        };
        let style = resolve_style(
            record,
            &self.settings.palette,
            &self.settings.instance,
            &loaded.layer.group,
            &loaded.layer.data,
        )
        .restored_style(&self.settings.instance);
        self.surface.set_marker_style(marker, &style);
    }
}

fn build_markers(layer: &Layer, settings: &DisplaySettings) -> Vec<MarkerDescriptor> {
    let context = LayerContext {
        group: &layer.group,
        data: &layer.data,
    };
    layer
        .records
        .iter()
        .map(|record| build_marker(record, &settings.palette, context, &settings.instance))
        .collect()
}

fn replace_region<V: DetailPanelView>(view: &mut V, region: PanelRegion, html: &str) -> bool {
    match view.replace(region, html) {
        Ok(()) => true,
        Err(err) => {
            warn!(%region, %err, "skipping panel region");
            false
        }
    }
}

fn append_region<V: DetailPanelView>(view: &mut V, region: PanelRegion, html: &str) -> bool {
    match view.append(region, html) {
        Ok(()) => true,
        Err(err) => {
            warn!(%region, %err, "skipping panel region");
            false
        }
    }
}

fn clear_region<V: DetailPanelView>(view: &mut V, region: PanelRegion) -> bool {
    match view.clear(region) {
        Ok(()) => true,
        Err(err) => {
            warn!(%region, %err, "skipping panel region");
            false
        }
    }
}

/// Append one rendered item per media entry; a malformed legacy field or a
/// missing region leaves the rest of the panel untouched.
fn populate<V, T>(
    view: &mut V,
    region: PanelRegion,
    source: Option<&MediaSource<T>>,
    render: fn(&T) -> String,
) where
    V: DetailPanelView,
    T: DeserializeOwned + Clone,
{
    let Some(source) = source else {
        return;
    };
    let items = match source.items() {
        Ok(items) => items,
        Err(err) => {
            warn!(%region, %err, "malformed media field; gallery left empty");
            return;
        }
    };
    for item in items.iter() {
        if !append_region(view, region, &render(item)) {
            break;
        }
    }
}
