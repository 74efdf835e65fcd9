use crate::AssetError;
use crate::texture::{TextureData, TextureSource};
use showroom_scene::TextureHandle;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Loading lifecycle notifications, in the order they occur.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// First item queued while the loader was idle.
    Started { total: usize },
    /// One item finished, successfully or not.
    Progress {
        url: String,
        loaded: usize,
        total: usize,
    },
    /// An item failed. Always followed by its `Progress`.
    Failed { url: String, error: String },
    /// Every queued item has finished.
    Completed { loaded: usize, failed: usize },
}

/// Decoded textures by handle.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: BTreeMap<TextureHandle, TextureData>,
}

impl TextureStore {
    pub fn get(&self, handle: TextureHandle) -> Option<&TextureData> {
        self.textures.get(&handle)
    }

    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

struct Job {
    handle: TextureHandle,
    source: TextureSource,
}

struct Outcome {
    handle: TextureHandle,
    url: String,
    result: Result<TextureData, AssetError>,
}

/// Background texture loader.
///
/// Decoding runs on a dedicated worker thread. `poll` drains finished work
/// without blocking and reports lifecycle events.
pub struct AssetLoader {
    root: PathBuf,
    jobs: Option<Sender<Job>>,
    outcomes: Receiver<Outcome>,
    worker: Option<JoinHandle<()>>,
    requested: HashSet<TextureHandle>,
    store: TextureStore,
    queued_events: Vec<LoadEvent>,
    items_total: usize,
    items_loaded: usize,
    items_failed: usize,
}

impl AssetLoader {
    /// Create a loader resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (out_tx, out_rx) = mpsc::channel::<Outcome>();

        let worker = std::thread::Builder::new()
            .name("showroom-asset-loader".into())
            .spawn(move || {
                for job in job_rx {
                    let _span = tracing::debug_span!("decode", url = %job.source.url()).entered();
                    let outcome = Outcome {
                        handle: job.handle,
                        url: job.source.url(),
                        result: job.source.decode(),
                    };
                    if out_tx.send(outcome).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            root: root.into(),
            jobs: Some(job_tx),
            outcomes: out_rx,
            worker: Some(worker),
            requested: HashSet::new(),
            store: TextureStore::default(),
            queued_events: Vec::new(),
            items_total: 0,
            items_loaded: 0,
            items_failed: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Queue a single image.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> TextureHandle {
        self.load(TextureSource::Image(path.as_ref().to_path_buf()))
    }

    /// Queue six cube faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn load_cube(&mut self, faces: [PathBuf; 6]) -> TextureHandle {
        self.load(TextureSource::Cube(Box::new(faces)))
    }

    /// Queue a source. The handle is usable immediately; pixels arrive later.
    pub fn load(&mut self, source: TextureSource) -> TextureHandle {
        let source = source.resolve(&self.root);
        let handle = source.handle();
        if !self.requested.insert(handle) {
            return handle;
        }

        if self.is_idle() {
            self.queued_events.push(LoadEvent::Started {
                total: self.items_total + 1,
            });
        }
        self.items_total += 1;

        let url = source.url();
        let sent = self
            .jobs
            .as_ref()
            .map(|tx| tx.send(Job { handle, source }).is_ok())
            .unwrap_or(false);
        if !sent {
            self.finish(Outcome {
                handle,
                url,
                result: Err(AssetError::WorkerGone),
            });
        }
        handle
    }

    /// Drain finished work without blocking.
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => self.finish(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.fail_outstanding();
                    break;
                }
            }
        }
        std::mem::take(&mut self.queued_events)
    }

    /// Block until every queued item finished or `timeout` elapsed.
    pub fn wait_idle(&mut self, timeout: Duration) -> Vec<LoadEvent> {
        let deadline = Instant::now() + timeout;
        while !self.is_idle() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.outcomes.recv_timeout(remaining) {
                Ok(outcome) => self.finish(outcome),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(
                        loaded = self.items_loaded,
                        total = self.items_total,
                        "timed out waiting for textures"
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.fail_outstanding();
                    break;
                }
            }
        }
        std::mem::take(&mut self.queued_events)
    }

    pub fn is_idle(&self) -> bool {
        self.items_loaded == self.items_total
    }

    pub fn store(&self) -> &TextureStore {
        &self.store
    }

    /// `(loaded, total)` item counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.items_loaded, self.items_total)
    }

    fn finish(&mut self, outcome: Outcome) {
        self.items_loaded += 1;
        match outcome.result {
            Ok(data) => {
                tracing::debug!(
                    url = %outcome.url,
                    width = data.width,
                    height = data.height,
                    "texture decoded"
                );
                self.store.textures.insert(outcome.handle, data);
            }
            Err(e) => {
                self.items_failed += 1;
                self.queued_events.push(LoadEvent::Failed {
                    url: outcome.url.clone(),
                    error: e.to_string(),
                });
            }
        }
        self.queued_events.push(LoadEvent::Progress {
            url: outcome.url,
            loaded: self.items_loaded,
            total: self.items_total,
        });
        if self.is_idle() {
            self.queued_events.push(LoadEvent::Completed {
                loaded: self.items_loaded,
                failed: self.items_failed,
            });
        }
    }

    fn fail_outstanding(&mut self) {
        while !self.is_idle() {
            self.finish(Outcome {
                handle: TextureHandle(0),
                url: String::from("<pending>"),
                result: Err(AssetError::WorkerGone),
            });
        }
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{CUBE_FACES, TextureKind};

    const WAIT: Duration = Duration::from_secs(10);

    fn write_png(path: &Path, w: u32, h: u32) {
        image::RgbaImage::new(w, h).save(path).unwrap();
    }

    #[test]
    fn lifecycle_for_single_texture() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("crate.png"), 2, 2);
        let mut loader = AssetLoader::new(dir.path()).unwrap();

        let handle = loader.load_texture("crate.png");
        assert!(!loader.is_idle());
        assert!(!loader.store().contains(handle));

        let events = loader.wait_idle(WAIT);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], LoadEvent::Started { total: 1 });
        assert!(matches!(events[1], LoadEvent::Progress { loaded: 1, total: 1, .. }));
        assert_eq!(events[2], LoadEvent::Completed { loaded: 1, failed: 0 });

        let data = loader.store().get(handle).unwrap();
        assert_eq!(data.kind, TextureKind::Flat);
        assert_eq!((data.width, data.height), (2, 2));
    }

    #[test]
    fn failure_is_reported_and_counts_as_done() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = AssetLoader::new(dir.path()).unwrap();
        let handle = loader.load_texture("missing.jpg");

        let events = loader.wait_idle(WAIT);
        assert!(events.iter().any(|e| matches!(e, LoadEvent::Failed { .. })));
        assert_eq!(
            events.last(),
            Some(&LoadEvent::Completed { loaded: 1, failed: 1 })
        );
        assert!(!loader.store().contains(handle));
        assert!(loader.is_idle());
    }

    #[test]
    fn duplicate_requests_share_a_handle() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 1, 1);
        let mut loader = AssetLoader::new(dir.path()).unwrap();
        let a = loader.load_texture("a.png");
        let b = loader.load_texture("a.png");
        assert_eq!(a, b);
        assert_eq!(loader.progress(), (0, 1));
        loader.wait_idle(WAIT);
        assert_eq!(loader.store().len(), 1);
    }

    #[test]
    fn cube_loads_six_layers() {
        let dir = tempfile::tempdir().unwrap();
        let mut faces = Vec::new();
        for face in CUBE_FACES {
            let name = format!("{face}.png");
            write_png(&dir.path().join(&name), 2, 2);
            faces.push(PathBuf::from(name));
        }
        let faces: [PathBuf; 6] = faces.try_into().unwrap();
        let mut loader = AssetLoader::new(dir.path()).unwrap();
        let handle = loader.load_cube(faces);
        loader.wait_idle(WAIT);
        let data = loader.store().get(handle).unwrap();
        assert_eq!(data.kind, TextureKind::Cube);
        assert_eq!(data.layers.len(), 6);
    }

    #[test]
    fn started_fires_again_after_idle() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 1, 1);
        write_png(&dir.path().join("b.png"), 1, 1);
        let mut loader = AssetLoader::new(dir.path()).unwrap();

        loader.load_texture("a.png");
        loader.wait_idle(WAIT);
        loader.load_texture("b.png");
        let events = loader.wait_idle(WAIT);
        assert_eq!(events[0], LoadEvent::Started { total: 2 });
        assert_eq!(
            events.last(),
            Some(&LoadEvent::Completed { loaded: 2, failed: 0 })
        );
    }

    #[test]
    fn poll_never_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = AssetLoader::new(dir.path()).unwrap();
        assert!(loader.poll().is_empty());
        loader.load_texture("missing.png");
        // Started is reported immediately, regardless of worker progress
        let events = loader.poll();
        assert_eq!(events.first(), Some(&LoadEvent::Started { total: 1 }));
    }
}
