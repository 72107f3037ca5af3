//! Resolution of specs to the items they expect at evaluation time

use super::validation::normalize_items;
use crate::logging::codes;
use crate::types::{
    DockerExpectedServicesSpec, EnvironmentSnapshot, ExpectedSetMode, ExpectedSetSpec,
    ExpectedSetTemplate, TomcatExpectedWebappsSpec, TomcatRole,
};
use crate::log_warning;
use std::collections::HashMap;
use uuid::Uuid;

/// Resolves specs against one environment's template catalog
///
/// TEMPLATE specs read the template's current items on every resolution.
pub struct ExpectedSetResolver<'a> {
    templates: HashMap<Uuid, &'a ExpectedSetTemplate>,
}

impl<'a> ExpectedSetResolver<'a> {
    pub fn new(templates: &'a [ExpectedSetTemplate]) -> Self {
        Self {
            templates: templates.iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn for_environment(env: &'a EnvironmentSnapshot) -> Self {
        Self::new(&env.templates)
    }

    pub fn template(&self, id: Uuid) -> Option<&'a ExpectedSetTemplate> {
        self.templates.get(&id).copied()
    }

    /// Items `spec` expects; UNCONFIGURED or absent specs expect nothing
    pub fn resolve<S: ExpectedSetSpec>(&self, spec: Option<&S>) -> Vec<String> {
        let Some(spec) = spec else {
            return Vec::new();
        };

        match spec.mode() {
            ExpectedSetMode::Unconfigured => Vec::new(),
            ExpectedSetMode::Explicit => normalize_items(spec.items()),
            ExpectedSetMode::Template => {
                let template = spec
                    .template_id()
                    .and_then(|id| self.template(id))
                    .filter(|t| t.kind == S::TEMPLATE_KIND);

                match template {
                    Some(template) => normalize_items(&template.items),
                    None => {
                        log_warning!(
                            codes::expected::TEMPLATE_UNRESOLVED,
                            "Expected-set template not found, treating set as empty",
                            "spec" => spec.key(),
                            "template_id" => spec
                                .template_id()
                                .map(|id| id.to_string())
                                .unwrap_or_else(|| "none".to_string())
                        );
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Expected webapp paths for one server role
    pub fn tomcat_webapps(
        &self,
        specs: &[TomcatExpectedWebappsSpec],
        server_id: Uuid,
        role: TomcatRole,
    ) -> Vec<String> {
        self.resolve(
            specs
                .iter()
                .find(|s| s.server_id == server_id && s.role == role),
        )
    }

    /// Expected service profiles for one Docker server
    pub fn docker_services(&self, specs: &[DockerExpectedServicesSpec], server_id: Uuid) -> Vec<String> {
        self.resolve(specs.iter().find(|s| s.server_id == server_id))
    }
}
