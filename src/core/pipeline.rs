//! The generation pipeline: model tree → roles → grid → documents.
//!
//! One synchronous pass. The placement shuffle is the only source of
//! randomness and is driven by a seeded `StdRng`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GeneratorConfig};
use crate::core::emit::{
    EmitError, Emitter, FactEmitter, GraphEmitter, OutputFormat, TripleEmitter,
};
use crate::core::grid::{GridLayout, NeighborPolicy};
use crate::core::output::{Document, OutputError, OutputWriter};
use crate::core::roles::RoleAssignment;
use crate::core::template::{ProblemTemplate, TemplateError};
use crate::core::tree::{ModelTree, TreeError};
use crate::schema::entity::{Status, Workstation};
use crate::schema::scenario::Scenario;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("output error: {0}")]
    Output(#[from] OutputError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("workstation {0} was not placed on the grid")]
    Unplaced(String),
}

/// Builds scenarios. Built via `ScenarioGenerator::builder()`.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    branching_factor: usize,
    neighbor_policy: NeighborPolicy,
    seed: u64,
}

/// Builder for constructing a `ScenarioGenerator`.
#[derive(Debug, Clone)]
pub struct ScenarioGeneratorBuilder {
    branching_factor: usize,
    neighbor_policy: NeighborPolicy,
    seed: Option<u64>,
}

impl ScenarioGenerator {
    pub fn builder() -> ScenarioGeneratorBuilder {
        ScenarioGeneratorBuilder {
            branching_factor: 1,
            neighbor_policy: NeighborPolicy::default(),
            seed: None,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<ScenarioGenerator, PipelineError> {
        let mut builder = Self::builder()
            .branching_factor(config.branching_factor)
            .neighbor_policy(config.neighbor_policy);
        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a scenario with up to `target` models, seeding the layout
    /// from the generator's seed.
    pub fn generate(&self, target: usize) -> Result<Scenario, PipelineError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.generate_with_rng(target, &mut rng)
    }

    /// Generate with a caller-provided random source for the placement
    /// shuffle. The recorded seed is the generator's.
    pub fn generate_with_rng<R>(
        &self,
        target: usize,
        rng: &mut R,
    ) -> Result<Scenario, PipelineError>
    where
        R: Rng + ?Sized,
    {
        let tree = ModelTree::build(target, self.branching_factor)?;
        debug!(models = tree.len(), depth = tree.depth(), "built model tree");

        let roles = RoleAssignment::assign(&tree);
        debug!(
            workstations = roles.producers.len(),
            items = roles.items.len(),
            "assigned roles"
        );

        let layout = GridLayout::place(&roles.workstation_ids(), self.neighbor_policy, rng);
        debug!(width = layout.width, policy = ?layout.policy, "placed workstations");

        let mut workstations = Vec::with_capacity(roles.producers.len());
        for producer in roles.producers {
            let location = layout
                .location_of(producer.id)
                .ok_or_else(|| PipelineError::Unplaced(producer.id.to_string()))?;
            workstations.push(Workstation {
                id: producer.id,
                status: Status::Off,
                produces: producer.produces,
                consumes: producer.consumes,
                location,
            });
        }

        Ok(Scenario::new(
            target,
            self.seed,
            layout.width,
            tree.models,
            workstations,
            roles.items,
            layout.locations,
        ))
    }
}

impl ScenarioGeneratorBuilder {
    pub fn branching_factor(mut self, k: usize) -> Self {
        self.branching_factor = k;
        self
    }

    pub fn neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.neighbor_policy = policy;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<ScenarioGenerator, PipelineError> {
        if self.branching_factor == 0 {
            return Err(TreeError::InvalidBranchingFactor(self.branching_factor).into());
        }
        Ok(ScenarioGenerator {
            branching_factor: self.branching_factor,
            neighbor_policy: self.neighbor_policy,
            seed: self.seed.unwrap_or_else(rand::random),
        })
    }
}

/// The emitters selected by `config`. The template is required when the
/// PDDL problem is among them.
pub fn emitters(
    config: &GeneratorConfig,
    template: Option<ProblemTemplate>,
) -> Vec<Box<dyn Emitter>> {
    let mut out: Vec<Box<dyn Emitter>> = Vec::new();
    if let Some(template) = template.filter(|_| config.wants(OutputFormat::Pddl)) {
        out.push(Box::new(FactEmitter::new(template)));
    }
    if config.wants(OutputFormat::N3) {
        out.push(Box::new(TripleEmitter::new()));
    }
    if config.wants(OutputFormat::JsonLd) {
        out.push(Box::new(GraphEmitter::new()));
    }
    out
}

/// Render `scenario` with every emitter, named after the realized count.
pub fn render(
    scenario: &Scenario,
    emitters: &[Box<dyn Emitter>],
) -> Result<Vec<Document>, EmitError> {
    emitters
        .iter()
        .map(|emitter| {
            let contents = emitter.emit(scenario)?;
            debug!(format = %emitter.format(), bytes = contents.len(), "emitted document");
            Ok(Document {
                file_name: emitter.format().file_name(scenario.realized()),
                contents,
            })
        })
        .collect()
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub requested: usize,
    pub realized: usize,
    pub seed: u64,
    pub workstations: usize,
    pub items: usize,
    pub grid_width: usize,
    pub written: Vec<PathBuf>,
}

impl RunReport {
    pub fn is_underrun(&self) -> bool {
        self.realized < self.requested
    }
}

/// Generate a scenario of `target` models and write the selected documents.
///
/// The template is read before anything is generated; a missing or
/// malformed template aborts the run with nothing written.
pub fn run(config: &GeneratorConfig, target: usize) -> Result<RunReport, PipelineError> {
    config.validate()?;

    let template = if config.wants(OutputFormat::Pddl) {
        Some(ProblemTemplate::load(&config.template)?)
    } else {
        None
    };

    let generator = ScenarioGenerator::from_config(config)?;
    info!(requested = target, seed = generator.seed(), "generating scenario");
    let scenario = generator.generate(target)?;

    if scenario.is_underrun() {
        warn!(
            requested = scenario.requested,
            realized = scenario.realized(),
            "level bound reached before the requested model count"
        );
    }

    let documents = render(&scenario, &emitters(config, template))?;
    let written = OutputWriter::new(&config.output_dir).write_all(&documents)?;
    info!(files = written.len(), realized = scenario.realized(), "run complete");

    Ok(RunReport {
        requested: scenario.requested,
        realized: scenario.realized(),
        seed: scenario.seed,
        workstations: scenario.workstations.len(),
        items: scenario.items.len(),
        grid_width: scenario.grid_width,
        written,
    })
}
