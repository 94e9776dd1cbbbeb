//! Artifact planner - resolves prerequisites before anything is rendered.
//!
//! Given the requested root artifacts, the planner walks the dependency
//! graph, checks which prerequisites already exist on disk, asks the
//! [`Confirmer`] about chainable ones and produces a topologically ordered
//! [`Plan`]. Missing hard prerequisites abort planning, so they are always
//! detected before any file is written.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    application::{
        ApplicationError,
        ports::{Confirmer, Filesystem},
    },
    domain::{ArtifactKind, DependencyPolicy, EntityNames, OverwritePolicy, PathLayout},
    error::{StencilError, StencilResult},
};

/// One artifact selected for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub kind: ArtifactKind,
    /// Project-relative target path.
    pub path: PathBuf,
    pub policy: OverwritePolicy,
    /// `false` for prerequisites pulled in by chaining.
    pub requested: bool,
}

/// Artifacts in dependency order: every prerequisite precedes its dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub artifacts: Vec<PlannedArtifact>,
}

impl Plan {
    pub fn contains(&self, kind: ArtifactKind) -> bool {
        self.artifacts.iter().any(|artifact| artifact.kind == kind)
    }

    pub fn kinds(&self) -> Vec<ArtifactKind> {
        self.artifacts.iter().map(|artifact| artifact.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Planning flags taken from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanFlags {
    pub force: bool,
    pub dry_run: bool,
}

pub struct ArtifactPlanner<'a> {
    filesystem: &'a dyn Filesystem,
    confirmer: &'a dyn Confirmer,
    layout: &'a PathLayout,
    root: &'a Path,
}

struct Walk<'n> {
    roots: Vec<ArtifactKind>,
    names: Option<&'n EntityNames>,
    flags: PlanFlags,
    visiting: HashSet<ArtifactKind>,
    done: HashSet<ArtifactKind>,
    order: Vec<PlannedArtifact>,
}

impl<'a> ArtifactPlanner<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        confirmer: &'a dyn Confirmer,
        layout: &'a PathLayout,
        root: &'a Path,
    ) -> Self {
        Self {
            filesystem,
            confirmer,
            layout,
            root,
        }
    }

    /// Compute the ordered artifact set for `roots`.
    ///
    /// Chained prerequisites are confirmed unless `force` or `dry_run` is
    /// set. Declining one, or missing a required one, is an error.
    pub fn plan(
        &self,
        roots: &[ArtifactKind],
        names: Option<&EntityNames>,
        flags: PlanFlags,
    ) -> StencilResult<Plan> {
        let mut walk = Walk {
            roots: roots.to_vec(),
            names,
            flags,
            visiting: HashSet::new(),
            done: HashSet::new(),
            order: Vec::new(),
        };

        for kind in roots {
            self.visit(*kind, &mut walk)?;
        }

        debug!(artifacts = walk.order.len(), "Plan computed");
        Ok(Plan {
            artifacts: walk.order,
        })
    }

    fn visit(&self, kind: ArtifactKind, walk: &mut Walk<'_>) -> StencilResult<()> {
        if walk.done.contains(&kind) {
            return Ok(());
        }
        if !walk.visiting.insert(kind) {
            return Err(StencilError::Internal {
                message: format!("dependency cycle through {kind}"),
            });
        }

        for dependency in kind.dependencies() {
            let dep = dependency.kind;

            if walk.roots.contains(&dep) || walk.done.contains(&dep) {
                self.visit(dep, walk)?;
                continue;
            }

            let path = self.layout.path_for(dep, walk.names);
            if self.filesystem.exists(&self.root.join(&path)) {
                debug!(prerequisite = %dep, path = %path.display(), "Prerequisite present");
                continue;
            }

            let artifact = dep.class_name(walk.names);
            let remediation = dep.remediation(walk.names);

            match dependency.policy {
                DependencyPolicy::Require => {
                    return Err(ApplicationError::PrerequisiteMissing {
                        artifact,
                        path,
                        remediation,
                    }
                    .into());
                }
                DependencyPolicy::Chain => {
                    let skip_prompt = walk.flags.force || walk.flags.dry_run;
                    if !skip_prompt {
                        let question = format!(
                            "{artifact} does not exist at {}. Generate it now?",
                            path.display()
                        );
                        if !self.confirmer.confirm(&question, true)? {
                            return Err(ApplicationError::PrerequisiteDeclined {
                                artifact,
                                remediation,
                            }
                            .into());
                        }
                    }
                    info!(prerequisite = %dep, for_artifact = %kind, "Chaining prerequisite");
                    self.visit(dep, walk)?;
                }
            }
        }

        walk.visiting.remove(&kind);
        walk.done.insert(kind);
        walk.order.push(PlannedArtifact {
            kind,
            path: self.layout.path_for(kind, walk.names),
            policy: overwrite_policy(kind, walk.flags.force),
            requested: walk.roots.contains(&kind),
        });
        Ok(())
    }
}

fn overwrite_policy(kind: ArtifactKind, force: bool) -> OverwritePolicy {
    if force {
        OverwritePolicy::ForceAlways
    } else if kind.is_init() {
        OverwritePolicy::SkipIfExists
    } else {
        OverwritePolicy::PromptIfExists
    }
}
