//! Persisting expected sets through an external store
//!
//! [`ExpectedSetService`] checks the caller and validates the whole batch
//! before the store is touched; an invalid batch never reaches it.

use super::error::ExpectedSetError;
use super::validation::SpecValidator;
use crate::config::EvaluationConfig;
use crate::logging::codes;
use crate::types::{DockerExpectedServicesSpec, ExpectedSetTemplate, Session, TomcatExpectedWebappsSpec};
use crate::{log_error, log_success};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Backend that replaces an environment's specs
pub trait ExpectedSetStore: Send + Sync {
    fn replace_tomcat_specs(
        &self,
        environment_id: Uuid,
        specs: Vec<TomcatExpectedWebappsSpec>,
    ) -> Result<(), ExpectedSetError>;

    fn replace_docker_specs(
        &self,
        environment_id: Uuid,
        specs: Vec<DockerExpectedServicesSpec>,
    ) -> Result<(), ExpectedSetError>;
}

pub struct ExpectedSetService<'a, St: ExpectedSetStore> {
    store: &'a St,
    config: &'a EvaluationConfig,
    templates: Option<&'a [ExpectedSetTemplate]>,
}

impl<'a, St: ExpectedSetStore> ExpectedSetService<'a, St> {
    pub fn new(store: &'a St, config: &'a EvaluationConfig) -> Self {
        Self {
            store,
            config,
            templates: None,
        }
    }

    /// Verify TEMPLATE references against this catalog
    pub fn with_templates(mut self, templates: &'a [ExpectedSetTemplate]) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn save_tomcat_specs(
        &self,
        session: &Session,
        environment_id: Uuid,
        specs: &[TomcatExpectedWebappsSpec],
    ) -> Result<Vec<TomcatExpectedWebappsSpec>, ExpectedSetError> {
        let prepared = self.authorize_and_prepare(session, environment_id, specs)?;
        self.store
            .replace_tomcat_specs(environment_id, prepared.clone())?;
        log_success!(
            codes::success::SPECS_SAVED,
            "Tomcat expected webapps saved",
            "environment_id" => environment_id,
            "specs" => prepared.len()
        );
        Ok(prepared)
    }

    pub fn save_docker_specs(
        &self,
        session: &Session,
        environment_id: Uuid,
        specs: &[DockerExpectedServicesSpec],
    ) -> Result<Vec<DockerExpectedServicesSpec>, ExpectedSetError> {
        let prepared = self.authorize_and_prepare(session, environment_id, specs)?;
        self.store
            .replace_docker_specs(environment_id, prepared.clone())?;
        log_success!(
            codes::success::SPECS_SAVED,
            "Docker expected services saved",
            "environment_id" => environment_id,
            "specs" => prepared.len()
        );
        Ok(prepared)
    }

    fn authorize_and_prepare<S: crate::types::ExpectedSetSpec>(
        &self,
        session: &Session,
        environment_id: Uuid,
        specs: &[S],
    ) -> Result<Vec<S>, ExpectedSetError> {
        if !session.can_edit_expected_sets() {
            log_error!(
                codes::expected::PERMISSION_DENIED,
                "Expected-set change refused",
                "user" => session.username,
                "environment_id" => environment_id
            );
            return Err(ExpectedSetError::PermissionDenied {
                username: session.username.clone(),
            });
        }

        let mut validator = SpecValidator::new(self.config)?;
        if let Some(templates) = self.templates {
            validator = validator.with_templates(templates);
        }

        validator.prepare_batch(specs).map_err(|e| {
            log_error!(
                codes::expected::SPEC_REJECTED,
                "Expected-set batch rejected",
                "environment_id" => environment_id,
                "reason" => e
            );
            e
        })
    }
}

/// Process-local store, keyed by environment
#[derive(Default)]
pub struct MemoryExpectedSetStore {
    tomcat: Mutex<HashMap<Uuid, Vec<TomcatExpectedWebappsSpec>>>,
    docker: Mutex<HashMap<Uuid, Vec<DockerExpectedServicesSpec>>>,
}

impl MemoryExpectedSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tomcat_specs(&self, environment_id: Uuid) -> Vec<TomcatExpectedWebappsSpec> {
        self.tomcat
            .lock()
            .ok()
            .and_then(|map| map.get(&environment_id).cloned())
            .unwrap_or_default()
    }

    pub fn docker_specs(&self, environment_id: Uuid) -> Vec<DockerExpectedServicesSpec> {
        self.docker
            .lock()
            .ok()
            .and_then(|map| map.get(&environment_id).cloned())
            .unwrap_or_default()
    }
}

impl ExpectedSetStore for MemoryExpectedSetStore {
    fn replace_tomcat_specs(
        &self,
        environment_id: Uuid,
        specs: Vec<TomcatExpectedWebappsSpec>,
    ) -> Result<(), ExpectedSetError> {
        let mut map = self
            .tomcat
            .lock()
            .map_err(|_| ExpectedSetError::Store("tomcat spec store poisoned".to_string()))?;
        map.insert(environment_id, specs);
        Ok(())
    }

    fn replace_docker_specs(
        &self,
        environment_id: Uuid,
        specs: Vec<DockerExpectedServicesSpec>,
    ) -> Result<(), ExpectedSetError> {
        let mut map = self
            .docker
            .lock()
            .map_err(|_| ExpectedSetError::Store("docker spec store poisoned".to_string()))?;
        map.insert(environment_id, specs);
        Ok(())
    }
}
