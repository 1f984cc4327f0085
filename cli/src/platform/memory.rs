//! In-memory platform
//!
//! A stateful stand-in for the REST adapter: writes mutate the stored services, variables and
//! processes so that later reads observe them. Every call is journaled, and any operation can be
//! made to fail with a preconfigured error.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::errors::{CliError, ErrorCode};
use crate::models::activity::{AppVersionEvent, ProcessEvent};
use crate::models::env::EnvVar;
use crate::models::import::{ImportResult, ImportedService};
use crate::models::logs::{newest_in_order, LogAccess, LogEntry, LogQuery};
use crate::models::process::{Process, ServiceStackRef};
use crate::models::project::{Project, UserInfo};
use crate::models::service::{AutoscalingParams, ServiceStack};
use crate::platform::port::{Connector, LogFetcher, PlatformPort};

#[derive(Debug, Default)]
struct State {
    user_info: Option<UserInfo>,
    projects: Vec<Project>,
    services: Vec<ServiceStack>,
    service_env: HashMap<String, Vec<EnvVar>>,
    project_env: Vec<EnvVar>,
    processes: Vec<Process>,
    app_versions: Vec<AppVersionEvent>,
    autoscaling: HashMap<String, AutoscalingParams>,
    log_access: Option<LogAccess>,
    errors: HashMap<String, CliError>,
    calls: Vec<String>,
    process_counter: usize,
    env_counter: usize,
    service_counter: usize,
}

impl State {
    fn enter(&mut self, op: &str) -> Result<(), CliError> {
        self.calls.push(op.to_string());
        match self.errors.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn service_ref(&self, service_id: &str) -> Vec<ServiceStackRef> {
        if service_id.is_empty() {
            return Vec::new();
        }
        let name = self
            .services
            .iter()
            .find(|s| s.id == service_id)
            .map(|s| s.hostname.clone())
            .unwrap_or_default();
        vec![ServiceStackRef {
            id: service_id.to_string(),
            name,
        }]
    }

    fn record_process(&mut self, action: &str, service_id: &str) -> Process {
        self.process_counter += 1;
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let process = Process {
            id: format!("proc-{}-{}", action, self.process_counter),
            action_name: action.to_string(),
            status: "DONE".to_string(),
            service_stacks: self.service_ref(service_id),
            created: now.clone(),
            started: Some(now.clone()),
            finished: Some(now),
            failure_reason: None,
        };
        self.processes.push(process.clone());
        process
    }

    fn next_env_id(&mut self) -> String {
        self.env_counter += 1;
        format!("env-{}", self.env_counter)
    }

    fn service_mut(&mut self, service_id: &str) -> Result<&mut ServiceStack, CliError> {
        self.services
            .iter_mut()
            .find(|s| s.id == service_id)
            .ok_or_else(|| {
                CliError::new(
                    ErrorCode::ServiceNotFound,
                    format!("service {service_id} not found"),
                )
            })
    }
}

/// In-memory [`PlatformPort`] implementation
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    state: Mutex<State>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.state.get_mut().user_info = Some(user_info);
        self
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.state.get_mut().projects = projects;
        self
    }

    pub fn with_services(mut self, services: Vec<ServiceStack>) -> Self {
        self.state.get_mut().services = services;
        self
    }

    pub fn with_service_env(mut self, service_id: &str, vars: Vec<EnvVar>) -> Self {
        self.state
            .get_mut()
            .service_env
            .insert(service_id.to_string(), vars);
        self
    }

    pub fn with_project_env(mut self, vars: Vec<EnvVar>) -> Self {
        self.state.get_mut().project_env = vars;
        self
    }

    pub fn with_process(mut self, process: Process) -> Self {
        self.state.get_mut().processes.push(process);
        self
    }

    pub fn with_app_versions(mut self, versions: Vec<AppVersionEvent>) -> Self {
        self.state.get_mut().app_versions = versions;
        self
    }

    pub fn with_log_access(mut self, access: LogAccess) -> Self {
        self.state.get_mut().log_access = Some(access);
        self
    }

    /// Make the named operation (e.g. `"start_service"`) fail with `err`
    pub fn with_error(mut self, op: &str, err: CliError) -> Self {
        self.state.get_mut().errors.insert(op.to_string(), err);
        self
    }

    /// Operation names in call order
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    pub async fn was_called(&self, op: &str) -> bool {
        self.state.lock().await.calls.iter().any(|c| c == op)
    }

    /// Current services, for assertions
    pub async fn services(&self) -> Vec<ServiceStack> {
        self.state.lock().await.services.clone()
    }

    /// Last autoscaling change applied to a service
    pub async fn autoscaling(&self, service_id: &str) -> Option<AutoscalingParams> {
        self.state.lock().await.autoscaling.get(service_id).cloned()
    }
}

#[async_trait]
impl PlatformPort for MemoryPlatform {
    async fn get_user_info(&self) -> Result<UserInfo, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_user_info")?;
        state.user_info.clone().ok_or_else(|| {
            CliError::new(ErrorCode::AuthTokenExpired, "unknown token")
        })
    }

    async fn list_projects(&self, _client_id: &str) -> Result<Vec<Project>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("list_projects")?;
        Ok(state.projects.clone())
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_project")?;
        state
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| CliError::api(format!("project {project_id} not found")))
    }

    async fn list_services(&self, project_id: &str) -> Result<Vec<ServiceStack>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("list_services")?;
        Ok(state
            .services
            .iter()
            .filter(|s| s.project_id.is_empty() || s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_service(&self, service_id: &str) -> Result<ServiceStack, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_service")?;
        state.service_mut(service_id).map(|s| s.clone())
    }

    async fn start_service(&self, service_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("start_service")?;
        state.service_mut(service_id)?.status = "ACTIVE".to_string();
        Ok(state.record_process("serviceStackStart", service_id))
    }

    async fn stop_service(&self, service_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("stop_service")?;
        state.service_mut(service_id)?.status = "STOPPED".to_string();
        Ok(state.record_process("serviceStackStop", service_id))
    }

    async fn restart_service(&self, service_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("restart_service")?;
        state.service_mut(service_id)?;
        Ok(state.record_process("serviceStackRestart", service_id))
    }

    async fn set_autoscaling(
        &self,
        service_id: &str,
        params: &AutoscalingParams,
    ) -> Result<Option<Process>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("set_autoscaling")?;
        state
            .autoscaling
            .insert(service_id.to_string(), params.clone());
        // applied immediately, nothing to track
        Ok(None)
    }

    async fn get_service_env(&self, service_id: &str) -> Result<Vec<EnvVar>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_service_env")?;
        Ok(state
            .service_env
            .get(service_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_service_env_file(
        &self,
        service_id: &str,
        content: &str,
    ) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("set_service_env_file")?;

        let mut vars = state.service_env.remove(service_id).unwrap_or_default();
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            match vars.iter().position(|v| v.key == key) {
                Some(pos) => vars[pos].content = value.to_string(),
                None => {
                    let id = state.next_env_id();
                    vars.push(EnvVar {
                        id,
                        key: key.to_string(),
                        content: value.to_string(),
                    });
                }
            }
        }
        state.service_env.insert(service_id.to_string(), vars);

        Ok(state.record_process("serviceStackUserDataFile", service_id))
    }

    async fn delete_user_data(&self, user_data_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("delete_user_data")?;

        let mut owner = String::new();
        for (service_id, vars) in state.service_env.iter_mut() {
            if let Some(pos) = vars.iter().position(|v| v.id == user_data_id) {
                vars.remove(pos);
                owner = service_id.clone();
                break;
            }
        }
        Ok(state.record_process("userDataDelete", &owner))
    }

    async fn get_project_env(&self, _project_id: &str) -> Result<Vec<EnvVar>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_project_env")?;
        Ok(state.project_env.clone())
    }

    async fn create_project_env(
        &self,
        _project_id: &str,
        key: &str,
        content: &str,
        _sensitive: bool,
    ) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("create_project_env")?;
        let id = state.next_env_id();
        state.project_env.push(EnvVar {
            id,
            key: key.to_string(),
            content: content.to_string(),
        });
        Ok(state.record_process("projectEnvCreate", ""))
    }

    async fn delete_project_env(&self, env_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("delete_project_env")?;
        state.project_env.retain(|v| v.id != env_id);
        Ok(state.record_process("projectEnvDelete", ""))
    }

    async fn import_services(
        &self,
        project_id: &str,
        yaml: &str,
    ) -> Result<ImportResult, CliError> {
        let mut state = self.state.lock().await;
        state.enter("import_services")?;

        let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let entries = document
            .get("services")
            .and_then(|s| s.as_sequence())
            .cloned()
            .unwrap_or_default();

        let mut imported = Vec::new();
        for entry in entries {
            let hostname = entry
                .get("hostname")
                .and_then(|h| h.as_str())
                .unwrap_or_default()
                .to_string();
            let type_version = entry
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or_default()
                .to_string();

            state.service_counter += 1;
            let id = format!("svc-imported-{}", state.service_counter);
            state.services.push(ServiceStack {
                id: id.clone(),
                hostname: hostname.clone(),
                project_id: project_id.to_string(),
                type_version,
                status: "ACTIVE".to_string(),
                ..Default::default()
            });
            let process = state.record_process("serviceStackImport", &id);
            imported.push(ImportedService {
                id,
                name: hostname,
                processes: vec![process],
                error: None,
            });
        }

        let project_name = state
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        Ok(ImportResult {
            project_id: project_id.to_string(),
            project_name,
            service_stacks: imported,
        })
    }

    async fn delete_service(&self, service_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("delete_service")?;
        state.service_mut(service_id)?;
        let process = state.record_process("serviceStackDelete", service_id);
        state.services.retain(|s| s.id != service_id);
        state.service_env.remove(service_id);
        Ok(process)
    }

    async fn get_process(&self, process_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_process")?;
        state
            .processes
            .iter()
            .find(|p| p.id == process_id)
            .cloned()
            .ok_or_else(|| {
                CliError::new(
                    ErrorCode::ProcessNotFound,
                    format!("process {process_id} not found"),
                )
            })
    }

    async fn cancel_process(&self, process_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("cancel_process")?;
        let process = state
            .processes
            .iter_mut()
            .find(|p| p.id == process_id)
            .ok_or_else(|| {
                CliError::new(
                    ErrorCode::ProcessNotFound,
                    format!("process {process_id} not found"),
                )
            })?;
        process.status = "CANCELLED".to_string();
        Ok(process.clone())
    }

    async fn enable_subdomain_access(&self, service_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("enable_subdomain_access")?;
        state.service_mut(service_id)?;
        Ok(state.record_process("serviceStackEnableSubdomainAccess", service_id))
    }

    async fn disable_subdomain_access(&self, service_id: &str) -> Result<Process, CliError> {
        let mut state = self.state.lock().await;
        state.enter("disable_subdomain_access")?;
        state.service_mut(service_id)?;
        Ok(state.record_process("serviceStackDisableSubdomainAccess", service_id))
    }

    async fn get_project_log(&self, project_id: &str) -> Result<LogAccess, CliError> {
        let mut state = self.state.lock().await;
        state.enter("get_project_log")?;
        state
            .log_access
            .clone()
            .ok_or_else(|| CliError::api(format!("no log access for project {project_id}")))
    }

    async fn search_processes(
        &self,
        _project_id: &str,
        limit: usize,
    ) -> Result<Vec<ProcessEvent>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("search_processes")?;
        Ok(state
            .processes
            .iter()
            .rev()
            .take(limit)
            .map(|p| ProcessEvent {
                id: p.id.clone(),
                project_id: String::new(),
                service_stacks: p.service_stacks.clone(),
                action_name: p.action_name.clone(),
                status: p.status.clone(),
                created: p.created.clone(),
                started: p.started.clone(),
                finished: p.finished.clone(),
                created_by_user: None,
                created_by_system: false,
            })
            .collect())
    }

    async fn search_app_versions(
        &self,
        _project_id: &str,
        limit: usize,
    ) -> Result<Vec<AppVersionEvent>, CliError> {
        let mut state = self.state.lock().await;
        state.enter("search_app_versions")?;
        Ok(state.app_versions.iter().take(limit).cloned().collect())
    }
}

/// Hands out one shared [`MemoryPlatform`] regardless of token
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    platform: Arc<MemoryPlatform>,
}

impl MemoryConnector {
    pub fn new(platform: Arc<MemoryPlatform>) -> Self {
        Self { platform }
    }
}

impl Connector for MemoryConnector {
    fn connect(
        &self,
        _token: &SecretString,
        _api_host: &str,
    ) -> Result<Arc<dyn PlatformPort>, CliError> {
        Ok(self.platform.clone())
    }
}

/// Serves a fixed set of log entries, applying the query filters
#[derive(Debug, Default)]
pub struct MemoryLogFetcher {
    entries: Vec<LogEntry>,
    queries: Mutex<Vec<LogQuery>>,
}

impl MemoryLogFetcher {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far
    pub async fn queries(&self) -> Vec<LogQuery> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl LogFetcher for MemoryLogFetcher {
    async fn fetch_logs(
        &self,
        _access: &LogAccess,
        query: &LogQuery,
    ) -> Result<Vec<LogEntry>, CliError> {
        self.queries.lock().await.push(query.clone());

        let matching: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|e| query.severity == "all" || e.severity.eq_ignore_ascii_case(&query.severity))
            .filter(|e| match &query.search {
                Some(text) => e.message.contains(text.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(newest_in_order(matching, query.limit))
    }
}
