use parking_lot::RwLock;
use sched_core::{TimetableRequest, TimetableResult};
use solver_heur::Engine;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobId(pub String);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(tag = "status")]
pub enum JobStatus {
    Queued,
    Running,
    Solved { result: TimetableResult },
    Failed { message: String },
}

/// Produces a timetable for a request. Runs on a blocking worker.
pub trait Runner: Send + Sync + 'static {
    fn run(&self, req: &TimetableRequest) -> TimetableResult;
}

impl Runner for Engine {
    fn run(&self, req: &TimetableRequest) -> TimetableResult {
        solver_heur::solve_request(req)
    }
}

/// Finished jobs kept by [`InMemJobs::new`].
pub const DEFAULT_RETAINED: usize = 1024;

#[derive(Default)]
struct Store {
    jobs: HashMap<String, JobStatus>,
    /// Finished job ids, oldest first.
    finished: VecDeque<String>,
}

impl Store {
    fn finish(&mut self, id: String, status: JobStatus, retained: usize) {
        self.jobs.insert(id.clone(), status);
        self.finished.push_back(id);
        while self.finished.len() > retained {
            if let Some(old) = self.finished.pop_front() {
                self.jobs.remove(&old);
            }
        }
    }
}

#[derive(Clone)]
pub struct InMemJobs<S: Runner> {
    inner: Arc<RwLock<Store>>,
    runner: Arc<S>,
    retained: usize,
}

impl<S: Runner> InMemJobs<S> {
    pub fn new(runner: S) -> Self {
        Self::with_retention(runner, DEFAULT_RETAINED)
    }

    /// Keeps at most `retained` solved or failed jobs; older ones are evicted.
    /// Queued and running jobs are never evicted.
    pub fn with_retention(runner: S, retained: usize) -> Self {
        Self {
            inner: Default::default(),
            runner: Arc::new(runner),
            retained,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn enqueue(&self, req: TimetableRequest) -> JobId {
        let id = Uuid::new_v4().to_string();
        self.inner.write().jobs.insert(id.clone(), JobStatus::Queued);

        let store = self.inner.clone();
        let runner = self.runner.clone();
        let retained = self.retained;
        let id_for_task = id.clone();

        tokio::spawn(async move {
            store
                .write()
                .jobs
                .insert(id_for_task.clone(), JobStatus::Running);

            let outcome = tokio::task::spawn_blocking(move || runner.run(&req)).await;
            match outcome {
                Ok(result) => {
                    info!(job = %id_for_task, status = %result.status, "job finished");
                    store
                        .write()
                        .finish(id_for_task, JobStatus::Solved { result }, retained);
                }
                Err(e) => {
                    error!(?e, job = %id_for_task, "job failed");
                    store.write().finish(
                        id_for_task,
                        JobStatus::Failed {
                            message: e.to_string(),
                        },
                        retained,
                    );
                }
            }
        });

        JobId(id)
    }

    pub fn get(&self, id: &str) -> Option<JobStatus> {
        self.inner.read().jobs.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::{Algorithm, SchedulerOptions};
    use std::time::Duration;

    fn empty_request() -> TimetableRequest {
        TimetableRequest {
            courses: vec![],
            rooms: vec![],
            days: vec!["Mon".into()],
            times: vec!["09:00".into()],
            options: SchedulerOptions::default(),
        }
    }

    struct Canned;

    impl Runner for Canned {
        fn run(&self, _: &TimetableRequest) -> TimetableResult {
            TimetableResult {
                status: "solved".into(),
                algorithm: Algorithm::Greedy,
                fitness: 0.0,
                assignments: vec![],
                stats: serde_json::json!({}),
            }
        }
    }

    struct Panics;

    impl Runner for Panics {
        fn run(&self, _: &TimetableRequest) -> TimetableResult {
            panic!("boom")
        }
    }

    async fn wait_for_end<S: Runner>(jobs: &InMemJobs<S>, id: &str) -> JobStatus {
        for _ in 0..200 {
            match jobs.get(id) {
                Some(JobStatus::Queued) | Some(JobStatus::Running) | None => {
                    tokio::time::sleep(Duration::from_millis(10)).await
                }
                Some(done) => return done,
            }
        }
        panic!("job {id} did not finish");
    }

    #[tokio::test]
    async fn job_runs_to_solved() {
        let jobs = InMemJobs::new(Canned);
        let id = jobs.enqueue(empty_request());
        match wait_for_end(&jobs, &id.0).await {
            JobStatus::Solved { result } => assert_eq!(result.status, "solved"),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[tokio::test]
    async fn panicking_runner_marks_job_failed() {
        let jobs = InMemJobs::new(Panics);
        let id = jobs.enqueue(empty_request());
        assert!(matches!(
            wait_for_end(&jobs, &id.0).await,
            JobStatus::Failed { .. }
        ));
    }

    #[test]
    fn unknown_job_is_none() {
        let jobs = InMemJobs::new(Canned);
        assert!(jobs.get("nope").is_none());
    }

    #[tokio::test]
    async fn oldest_finished_jobs_are_evicted() {
        let jobs = InMemJobs::with_retention(Canned, 2);
        let mut ids = Vec::new();
        for _ in 0..3 {
            let id = jobs.enqueue(empty_request());
            wait_for_end(&jobs, &id.0).await;
            ids.push(id.0);
        }
        assert!(jobs.get(&ids[0]).is_none());
        assert!(jobs.get(&ids[1]).is_some());
        assert!(jobs.get(&ids[2]).is_some());
    }

    #[test]
    fn store_keeps_unfinished_jobs_past_retention() {
        let mut store = Store::default();
        store.jobs.insert("q".into(), JobStatus::Queued);
        store.finish("a".into(), JobStatus::Failed { message: "x".into() }, 0);
        assert!(store.jobs.contains_key("q"));
        assert!(!store.jobs.contains_key("a"));
        assert!(store.finished.is_empty());
    }

    #[tokio::test]
    async fn engine_runner_reports_partial_for_empty_rooms() {
        let jobs = InMemJobs::new(Engine::new());
        let mut req = empty_request();
        req.courses = vec![sched_core::Course {
            id: "c1".into(),
            name: "Algebra".into(),
            category: "Mathematics".into(),
            teacher: "t1".into(),
            students: 10,
            duration: 1,
            preferred_slots: vec![],
            preferred_days: vec![],
            priority: None,
        }];
        let id = jobs.enqueue(req);
        match wait_for_end(&jobs, &id.0).await {
            JobStatus::Solved { result } => {
                assert_eq!(result.status, "partial");
                assert!(result.assignments[0].conflict);
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn status_serializes_with_tag() {
        let v = serde_json::to_value(JobStatus::Queued).unwrap();
        assert_eq!(v["status"], "Queued");
    }
}
