use std::time::{Duration, Instant};

use log::{error, info};
use uuid::Uuid;

use crate::error::ImportError;

use super::{
    build_name,
    step::{ImportSummary, Step, StepExecution},
};

type JobResult<T> = Result<T, ImportError>;

/// A run of one or more steps, executed in order.
pub trait Job {
    fn run(&self) -> JobResult<JobExecution>;
}

/// Timing and per-step details of a finished run.
#[derive(Debug)]
pub struct JobExecution {
    pub id: Uuid,
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    pub step_executions: Vec<StepExecution>,
}

impl JobExecution {
    /// Counters of every step added together.
    pub fn summary(&self) -> ImportSummary {
        self.step_executions
            .iter()
            .fold(ImportSummary::default(), |mut summary, execution| {
                summary.merge(&execution.summary());
                summary
            })
    }
}

/// The context of one import run: an id, a name, a source description and
/// the steps to execute.
///
/// Nothing of the run outlives it; it is never persisted.
pub struct JobInstance<'a> {
    id: Uuid,
    name: String,
    source: Option<String>,
    steps: Vec<&'a dyn Step>,
}

impl JobInstance<'_> {
    pub fn get_id(&self) -> Uuid {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
}

impl Job for JobInstance<'_> {
    fn run(&self) -> JobResult<JobExecution> {
        let start = Instant::now();

        info!("Start of job: {}, id: {}", self.name, self.id);
        if let Some(source) = &self.source {
            info!("Importing physical object data from {}...", source);
        }

        let mut step_executions = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let mut step_execution = StepExecution::new(step.get_name());

            if let Err(err) = step.execute(&mut step_execution) {
                error!("Job {} aborted in step {}: {}", self.name, step.get_name(), err);
                return Err(ImportError::Step {
                    name: step.get_name().to_owned(),
                    source: Box::new(err),
                });
            }

            step_executions.push(step_execution);
        }

        info!("Import complete!");
        info!("End of job: {}, id: {}", self.name, self.id);

        Ok(JobExecution {
            id: self.id,
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            step_executions,
        })
    }
}

#[derive(Default)]
pub struct JobBuilder<'a> {
    name: Option<String>,
    source: Option<String>,
    steps: Vec<&'a dyn Step>,
}

impl<'a> JobBuilder<'a> {
    pub fn new() -> Self {
        Self {
            name: None,
            source: None,
            steps: Vec::new(),
        }
    }

    pub fn name(mut self, name: String) -> JobBuilder<'a> {
        self.name = Some(name);
        self
    }

    /// Describes where the rows come from, for the start of run log line.
    pub fn source(mut self, source: String) -> JobBuilder<'a> {
        self.source = Some(source);
        self
    }

    pub fn start(mut self, step: &'a dyn Step) -> JobBuilder<'a> {
        self.steps.push(step);
        self
    }

    pub fn next(mut self, step: &'a dyn Step) -> JobBuilder<'a> {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> JobInstance<'a> {
        JobInstance {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            source: self.source,
            steps: self.steps,
        }
    }
}
