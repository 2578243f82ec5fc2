//! Deck generation driver.
//!
//! Walks content groups in discovery order: select a layout via the rule
//! table, resolve it against the template, populate a slide, and append it
//! to the deck. An error in one group abandons that group and the run
//! continues; only template structure and final save failures are fatal.

use std::path::Path;

use tracing::{info, warn};

use deckgen_core::{ContentGroup, RuleTable};

use crate::error::{DeckError, Result};
use crate::layout::LayoutResolver;
use crate::populate::{PlacementOutcome, Populator};
use crate::slide::Slide;
use crate::template::DeckTemplate;
use crate::writer::DeckWriter;

/// Per-group generation record
#[derive(Debug)]
pub struct GroupReport {
    /// Group name
    pub group: String,

    /// Layout the rule table selected
    pub requested_layout: String,

    /// Layout actually used (after fallback)
    pub resolved_layout: String,

    /// Per-item outcomes
    pub outcomes: Vec<PlacementOutcome>,
}

impl GroupReport {
    /// Number of items bound to a placeholder
    pub fn bound(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_bound()).count()
    }

    /// Number of items skipped or failed
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.bound()
    }
}

/// Whole-run generation record
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// One entry per rendered slide, in slide order
    pub groups: Vec<GroupReport>,

    /// Names of groups abandoned after an error
    pub failed_groups: Vec<String>,
}

impl GenerationReport {
    /// Number of slides rendered
    pub fn slide_count(&self) -> usize {
        self.groups.len()
    }
}

/// Coordinates rule selection, layout resolution, and population
pub struct DeckGenerator {
    template: DeckTemplate,
    rules: RuleTable,
}

impl DeckGenerator {
    /// Create a generator over a template and rule table
    pub fn new(template: DeckTemplate, rules: RuleTable) -> Self {
        Self { template, rules }
    }

    /// The template this generator renders into
    pub fn template(&self) -> &DeckTemplate {
        &self.template
    }

    /// The active rule table
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Build slides for every group and return the serialized deck
    pub fn build(&self, groups: &[ContentGroup]) -> Result<(Vec<u8>, GenerationReport)> {
        let mut writer = DeckWriter::new(&self.template);
        let mut report = GenerationReport::default();
        let resolver = self.template.resolver();

        for group in groups {
            match self.process_group(&resolver, group) {
                Ok((slide, group_report)) => {
                    writer.add_slide(slide);
                    report.groups.push(group_report);
                }
                // A template without layouts can't render anything
                Err(DeckError::NoLayouts) => return Err(DeckError::NoLayouts),
                Err(e) => {
                    warn!(group = %group.name, error = %e, "abandoning group after error");
                    report.failed_groups.push(group.name.clone());
                }
            }
        }

        let bytes = writer.generate()?;
        Ok((bytes, report))
    }

    /// Build slides for every group and save the deck to `output`
    pub fn generate(
        &self,
        groups: &[ContentGroup],
        output: impl AsRef<Path>,
    ) -> Result<GenerationReport> {
        let (bytes, report) = self.build(groups)?;

        let output = output.as_ref();
        std::fs::write(output, &bytes).map_err(|source| DeckError::Persistence {
            path: output.display().to_string(),
            source,
        })?;

        info!(
            path = %output.display(),
            slides = report.slide_count(),
            "presentation saved"
        );
        Ok(report)
    }

    fn process_group(
        &self,
        resolver: &LayoutResolver<'_>,
        group: &ContentGroup,
    ) -> Result<(Slide, GroupReport)> {
        let composition = group.composition();
        let requested = self.rules.select_layout(&composition).to_string();
        info!(
            group = %group.name,
            images = composition.images,
            texts = composition.texts,
            videos = composition.videos,
            layout = %requested,
            "processing content group"
        );

        let layout = resolver.resolve(&requested)?;
        let (slide, outcomes) = Populator::new(layout).populate(group);

        Ok((
            slide,
            GroupReport {
                group: group.name.clone(),
                requested_layout: requested,
                resolved_layout: layout.name.clone(),
                outcomes,
            },
        ))
    }
}
