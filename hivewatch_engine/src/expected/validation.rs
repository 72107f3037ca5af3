//! Validation and flattening of specs before they are persisted

use super::error::ExpectedSetError;
use crate::config::EvaluationConfig;
use crate::types::{ExpectedSetMode, ExpectedSetSpec, ExpectedSetTemplate, ExpectedSetTemplateKind};
use regex::Regex;
use std::collections::HashSet;

/// Docker service profiles: letters, digits, `_` and `-`
pub const PROFILE_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Trim, drop blanks and remove duplicates, keeping first appearance
pub fn normalize_items(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty() && seen.insert(*item))
        .map(str::to_string)
        .collect()
}

/// Validates specs against item rules and an optional template catalog
pub struct SpecValidator<'a> {
    config: &'a EvaluationConfig,
    templates: Option<&'a [ExpectedSetTemplate]>,
    profile_pattern: Regex,
}

impl<'a> SpecValidator<'a> {
    pub fn new(config: &'a EvaluationConfig) -> Result<Self, ExpectedSetError> {
        let profile_pattern =
            Regex::new(PROFILE_PATTERN).map_err(|e| ExpectedSetError::Pattern(e.to_string()))?;
        Ok(Self {
            config,
            templates: None,
            profile_pattern,
        })
    }

    /// Also check that referenced templates exist with the right kind
    pub fn with_templates(mut self, templates: &'a [ExpectedSetTemplate]) -> Self {
        self.templates = Some(templates);
        self
    }

    /// The form a spec is stored in
    ///
    /// EXPLICIT specs keep their normalized items; TEMPLATE specs keep only
    /// the template reference.
    pub fn prepare_for_save<S: ExpectedSetSpec>(&self, spec: &S) -> Result<S, ExpectedSetError> {
        let key = spec.key();

        match spec.mode() {
            ExpectedSetMode::Unconfigured => Err(ExpectedSetError::Unconfigured { key }),
            ExpectedSetMode::Explicit => {
                if spec.template_id().is_some() {
                    return Err(ExpectedSetError::TemplateIdNotAllowed {
                        key,
                        mode: ExpectedSetMode::Explicit,
                    });
                }
                let items = normalize_items(spec.items());
                if items.is_empty() {
                    return Err(ExpectedSetError::EmptyItems { key });
                }
                for item in &items {
                    self.check_item(S::TEMPLATE_KIND, &key, item)?;
                }
                Ok(spec.rebuilt(ExpectedSetMode::Explicit, None, items))
            }
            ExpectedSetMode::Template => {
                let template_id = spec
                    .template_id()
                    .ok_or_else(|| ExpectedSetError::MissingTemplateId { key: key.clone() })?;

                if let Some(templates) = self.templates {
                    let template = templates
                        .iter()
                        .find(|t| t.id == template_id)
                        .ok_or_else(|| ExpectedSetError::TemplateNotFound {
                            key: key.clone(),
                            template_id,
                        })?;
                    if template.kind != S::TEMPLATE_KIND {
                        return Err(ExpectedSetError::TemplateKindMismatch {
                            key,
                            expected: S::TEMPLATE_KIND,
                            actual: template.kind,
                        });
                    }
                }

                Ok(spec.rebuilt(ExpectedSetMode::Template, Some(template_id), Vec::new()))
            }
        }
    }

    /// Prepare a replace-all batch; one spec per server (and role)
    pub fn prepare_batch<S: ExpectedSetSpec>(&self, specs: &[S]) -> Result<Vec<S>, ExpectedSetError> {
        let mut keys = HashSet::new();
        let mut prepared = Vec::with_capacity(specs.len());

        for spec in specs {
            let key = spec.key();
            if !keys.insert(key.clone()) {
                return Err(ExpectedSetError::DuplicateSpec { key });
            }
            prepared.push(self.prepare_for_save(spec)?);
        }

        Ok(prepared)
    }

    fn check_item(
        &self,
        kind: ExpectedSetTemplateKind,
        key: &str,
        item: &str,
    ) -> Result<(), ExpectedSetError> {
        match kind {
            ExpectedSetTemplateKind::TomcatWebappPath => {
                if !item.starts_with('/') {
                    return Err(ExpectedSetError::InvalidPath {
                        key: key.to_string(),
                        path: item.to_string(),
                    });
                }
                if self.config.is_built_in(item) {
                    return Err(ExpectedSetError::BuiltInPath {
                        key: key.to_string(),
                        path: item.to_string(),
                    });
                }
            }
            ExpectedSetTemplateKind::DockerServiceProfile => {
                if !self.profile_pattern.is_match(item) {
                    return Err(ExpectedSetError::InvalidProfile {
                        key: key.to_string(),
                        profile: item.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
