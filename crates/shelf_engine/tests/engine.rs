use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use shelf_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, MetadataError, MetadataService, Stager,
    StagingError,
};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeStager {
    calls: Mutex<Vec<String>>,
    fail_stage: bool,
}

#[async_trait::async_trait]
impl Stager for FakeStager {
    async fn stage(&self, paths: &[String]) -> Result<Vec<String>, StagingError> {
        self.calls.lock().unwrap().push(format!("stage {}", paths.len()));
        if self.fail_stage {
            return Err(StagingError::StagingDir("read-only".to_string()));
        }
        Ok(paths.iter().map(|p| format!("/staged{p}")).collect())
    }

    async fn clear(&self) -> Result<(), StagingError> {
        self.calls.lock().unwrap().push("clear".to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakeMetadata {
    sizes: HashMap<String, u64>,
}

#[async_trait::async_trait]
impl MetadataService for FakeMetadata {
    async fn size(&self, path: &str) -> Result<u64, MetadataError> {
        self.sizes.get(path).copied().ok_or_else(|| MetadataError::Io {
            path: path.to_string(),
            message: "missing".to_string(),
        })
    }
}

fn start(
    stager: Arc<FakeStager>,
    metadata: FakeMetadata,
) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        stager,
        Arc::new(metadata),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .unwrap();
    (engine, rx)
}

#[test]
fn stage_result_carries_generation() {
    let (engine, events) = start(Arc::new(FakeStager::default()), FakeMetadata::default());

    engine.stage(7, vec!["/a.txt".to_string(), "/b.txt".to_string()]);

    assert_eq!(
        events.recv_timeout(WAIT).unwrap(),
        EngineEvent::Staged {
            generation: 7,
            result: Ok(vec!["/staged/a.txt".to_string(), "/staged/b.txt".to_string()]),
        }
    );
}

#[test]
fn stage_failure_is_reported() {
    let stager = Arc::new(FakeStager {
        fail_stage: true,
        ..FakeStager::default()
    });
    let (engine, events) = start(stager, FakeMetadata::default());

    engine.stage(1, vec!["/a.txt".to_string()]);

    let EngineEvent::Staged { generation, result } = events.recv_timeout(WAIT).unwrap() else {
        panic!("expected stage event");
    };
    assert_eq!(generation, 1);
    assert!(result.is_err());
}

#[test]
fn size_lookups_resolve_independently() {
    let metadata = FakeMetadata {
        sizes: HashMap::from([("/staged/a.txt".to_string(), 42)]),
    };
    let (engine, events) = start(Arc::new(FakeStager::default()), metadata);

    engine.request_size(3, 0, "/staged/a.txt");
    engine.request_size(3, 1, "/staged/missing.txt");

    let mut resolved = HashMap::new();
    for _ in 0..2 {
        match events.recv_timeout(WAIT).unwrap() {
            EngineEvent::SizeResolved {
                generation,
                index,
                result,
            } => {
                assert_eq!(generation, 3);
                resolved.insert(index, result);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(resolved[&0], Ok(42));
    assert!(resolved[&1].is_err());
}

#[test]
fn stager_requests_run_in_order_and_shutdown_clears() {
    let stager = Arc::new(FakeStager::default());
    let (engine, events) = start(stager.clone(), FakeMetadata::default());

    engine.stage(1, vec!["/a.txt".to_string()]);
    engine.clear();
    engine.stage(2, vec!["/b.txt".to_string(), "/c.txt".to_string()]);
    assert!(engine.shutdown(WAIT));

    assert!(matches!(
        events.recv_timeout(WAIT).unwrap(),
        EngineEvent::Staged { generation: 1, .. }
    ));
    assert_eq!(
        events.recv_timeout(WAIT).unwrap(),
        EngineEvent::Cleared { result: Ok(()) }
    );
    assert!(matches!(
        events.recv_timeout(WAIT).unwrap(),
        EngineEvent::Staged { generation: 2, .. }
    ));
    assert_eq!(
        *stager.calls.lock().unwrap(),
        vec![
            "stage 1".to_string(),
            "clear".to_string(),
            "stage 2".to_string(),
            "clear".to_string(),
        ]
    );
}
