use crate::adapters::TracingSink;
use crate::core::environment::Environment;
use crate::core::launcher::ShellLauncher;
use crate::core::ordering;
use crate::core::signals::TerminationSignals;
use crate::domain::model::{Config, ServiceRecord, SupervisorEvent};
use crate::domain::ports::{EventSink, Launcher};
use crate::utils::error::Result;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const BANNER: &str = "☁ Tormenta Cloud OS -> Init ☁";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Starting,
    Running,
    ShuttingDown,
    Terminated,
}

/// Owns the service roster: dispatches one launch task per service, then
/// waits for a termination signal and reports the shutdown.
///
/// Launch outcomes only reach the event sink. The supervisor never learns
/// whether a service actually started.
pub struct Supervisor<L: Launcher + 'static> {
    config: Arc<Config>,
    environment: Environment,
    launcher: Arc<L>,
    sink: Arc<dyn EventSink>,
    state: Mutex<SupervisorState>,
}

impl Supervisor<ShellLauncher> {
    /// Shell launcher, default environment, log output.
    pub fn with_defaults(config: Config) -> Self {
        let environment = Environment::init_defaults();
        let launcher = ShellLauncher::new(environment.clone());
        Self::new(config, environment, launcher, Arc::new(TracingSink))
    }
}

impl<L: Launcher + 'static> Supervisor<L> {
    pub fn new(
        config: Config,
        environment: Environment,
        launcher: L,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            environment,
            launcher: Arc::new(launcher),
            sink,
            state: Mutex::new(SupervisorState::Idle),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> SupervisorState {
        match self.state.lock() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set_state(&self, next: SupervisorState) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        tracing::debug!("supervisor state {:?} -> {:?}", *state, next);
        *state = next;
    }

    pub fn ordered_services(&self) -> Vec<&ServiceRecord> {
        ordering::sort_by_position(&self.config.services)
    }

    pub fn effective_timeout(&self, service: &ServiceRecord) -> Duration {
        ordering::effective_timeout(service.timeout_secs, self.config.timeout_secs)
    }

    pub fn print_banner(&self) {
        println!("{}", BANNER);
        println!("{}", self.config.start_message);
    }

    /// Spawns one launch task per service, in dispatch order, without waiting
    /// on any of them. The handles are only returned for callers that want to
    /// join; `run` drops them.
    pub fn start_services(&self) -> Vec<JoinHandle<()>> {
        self.set_state(SupervisorState::Starting);

        let handles = self
            .ordered_services()
            .into_iter()
            .map(|service| {
                let record = service.clone();
                let timeout = self.effective_timeout(&record);
                let launcher = Arc::clone(&self.launcher);
                let sink = Arc::clone(&self.sink);

                tracing::debug!(
                    service = %record.name,
                    position = record.position,
                    timeout_secs = timeout.as_secs(),
                    "dispatching"
                );

                tokio::spawn(async move {
                    launcher.start(&record, timeout, sink.as_ref()).await;
                })
            })
            .collect();

        self.set_state(SupervisorState::Running);
        handles
    }

    /// Full run: banner, environment, fan-out, then block until SIGINT or
    /// SIGTERM and report the shutdown.
    pub async fn run(&self) -> Result<()> {
        let mut signals = TerminationSignals::install()?;
        self.run_until(async move {
            let signal = signals.recv().await;
            tracing::info!("received {}", signal);
        })
        .await
    }

    /// Same as [`Supervisor::run`] with an arbitrary shutdown trigger.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.print_banner();
        self.environment.apply()?;

        let handles = self.start_services();
        tracing::info!("dispatched {} services", handles.len());

        shutdown.await;

        self.stop();
        self.set_state(SupervisorState::Terminated);
        Ok(())
    }

    /// Reports every configured service as stopping, in dispatch order. No
    /// process is signalled.
    pub fn stop(&self) {
        self.set_state(SupervisorState::ShuttingDown);
        println!("{}", self.config.stop_message);
        for service in self.ordered_services() {
            self.sink.emit(SupervisorEvent::stopping(service));
        }
    }

    /// Currently reports exactly like [`Supervisor::stop`]; it never
    /// re-enters the starting state.
    pub fn restart(&self) {
        self.set_state(SupervisorState::ShuttingDown);
        println!("{}", self.config.stop_message);
        for service in self.ordered_services() {
            self.sink.emit(SupervisorEvent::stopping(service));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ChannelSink;
    use async_trait::async_trait;

    /// Records what would have been launched, in call order.
    #[derive(Default)]
    struct RecordingLauncher {
        calls: Mutex<Vec<(String, Duration)>>,
    }

    #[async_trait]
    impl Launcher for RecordingLauncher {
        async fn start(&self, record: &ServiceRecord, timeout: Duration, sink: &dyn EventSink) {
            self.calls
                .lock()
                .unwrap()
                .push((record.name.clone(), timeout));
            sink.emit(SupervisorEvent::started(record, &record.start_commands[0]));
        }
    }

    fn config() -> Config {
        Config::new(
            5,
            vec![
                ServiceRecord::new("svc3", vec!["true".to_string()]).with_position(3),
                ServiceRecord::new("svc1-first", vec!["true".to_string()])
                    .with_position(1)
                    .with_timeout(1),
                ServiceRecord::new("svc1-second", vec!["true".to_string()])
                    .with_position(1)
                    .with_timeout(10),
                ServiceRecord::new("svc2", vec!["true".to_string()]).with_position(2),
            ],
        )
    }

    fn supervisor() -> (
        Supervisor<RecordingLauncher>,
        tokio::sync::mpsc::UnboundedReceiver<SupervisorEvent>,
    ) {
        let (sink, rx) = ChannelSink::new();
        let supervisor = Supervisor::new(
            config(),
            Environment::new(),
            RecordingLauncher::default(),
            Arc::new(sink),
        );
        (supervisor, rx)
    }

    #[test]
    fn test_ordered_services() {
        let (supervisor, _rx) = supervisor();
        let names: Vec<&str> = supervisor
            .ordered_services()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["svc1-first", "svc1-second", "svc2", "svc3"]);
    }

    #[test]
    fn test_effective_timeout_uses_global_floor() {
        let (supervisor, _rx) = supervisor();
        let services = &supervisor.config().services;
        assert_eq!(supervisor.effective_timeout(&services[1]), Duration::from_secs(5));
        assert_eq!(supervisor.effective_timeout(&services[2]), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_start_services_launches_everything() {
        let (supervisor, mut rx) = supervisor();
        assert_eq!(supervisor.state(), SupervisorState::Idle);

        for handle in supervisor.start_services() {
            handle.await.unwrap();
        }

        assert_eq!(supervisor.state(), SupervisorState::Running);
        let calls = supervisor.launcher.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 4);
        assert!(calls.contains(&("svc1-first".to_string(), Duration::from_secs(5))));
        assert!(calls.contains(&("svc1-second".to_string(), Duration::from_secs(10))));

        let mut started = 0;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, SupervisorEvent::Launch { .. }));
            started += 1;
        }
        assert_eq!(started, 4);
    }

    #[tokio::test]
    async fn test_run_until_reports_every_service_once() {
        let (supervisor, mut rx) = supervisor();

        supervisor.run_until(async {}).await.unwrap();

        assert_eq!(supervisor.state(), SupervisorState::Terminated);
        let mut stopping = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let SupervisorEvent::Stopping { service, .. } = event {
                stopping.push(service);
            }
        }
        assert_eq!(stopping, vec!["svc1-first", "svc1-second", "svc2", "svc3"]);
    }

    #[test]
    fn test_stop_and_restart_report_identically() {
        let (supervisor, mut rx) = supervisor();
        let before = supervisor.config().clone();

        supervisor.stop();
        let mut first = Vec::new();
        while let Ok(event) = rx.try_recv() {
            first.push(event);
        }

        supervisor.restart();
        let mut second = Vec::new();
        while let Ok(event) = rx.try_recv() {
            second.push(event);
        }

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        assert_eq!(supervisor.config(), &before);
        assert_eq!(supervisor.state(), SupervisorState::ShuttingDown);
    }
}
