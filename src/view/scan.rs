use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::state::{ScanData, ViewError, ViewState};
use crate::feeds::{
    reshape_asteroids, reshape_satellites, AsteroidsResponse, FeedError, FeedSource,
    SatellitesResponse, ASTEROID_SEARCH_RADIUS, SATELLITE_SEARCH_RADIUS,
};
use crate::geo::GeoPosition;

/// How long focus is held after a scan settles.
pub const FOCUS_HOLD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub satellites: usize,
    pub asteroids: usize,
    pub error: Option<String>,
}

#[derive(Debug)]
struct FocusTimer {
    cancel_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

pub fn lock_view(view: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs scans against a feed source and owns the focus-release timer.
pub struct Scanner<S: FeedSource> {
    source: Arc<S>,
    view: Arc<Mutex<ViewState>>,
    hold: Duration,
    focus_timer: Option<FocusTimer>,
}

impl<S: FeedSource> Scanner<S> {
    pub fn new(source: S, view: Arc<Mutex<ViewState>>, hold: Duration) -> Self {
        Self {
            source: Arc::new(source),
            view,
            hold,
            focus_timer: None,
        }
    }

    /// Fetches satellites then asteroids. Fetch failures are recorded in the
    /// view state; the only error returned is a missing position.
    pub async fn scan(&mut self) -> Result<ScanSummary, ViewError> {
        self.cancel_focus_timer();

        let position = lock_view(&self.view).begin_scan()?;
        log::info!("Scanning sector around {}", position);

        let fetched = fetch(self.source.clone(), position).await;

        let (summary, generation) = {
            let mut view = lock_view(&self.view);
            settle(&mut view, fetched);
            let summary = ScanSummary {
                satellites: view.satellites().len(),
                asteroids: view.asteroids().len(),
                error: view.error().map(String::from),
            };
            (summary, view.generation())
        };

        self.arm_focus_timer(generation);
        Ok(summary)
    }

    /// Cancels a pending focus release and waits for its task to finish.
    pub async fn shutdown(&mut self) {
        if let Some(timer) = self.focus_timer.take() {
            let _ = timer.cancel_tx.send(());
            let _ = timer.join.await;
        }
    }

    fn cancel_focus_timer(&mut self) {
        if let Some(timer) = self.focus_timer.take() {
            let _ = timer.cancel_tx.send(());
        }
    }

    fn arm_focus_timer(&mut self, generation: u64) {
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let view = self.view.clone();
        let hold = self.hold;

        let join = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = &mut cancel_rx => {}
                _ = sleep(hold) => {
                    // a cancel that lost the race is caught by the generation check
                    if lock_view(&view).release_focus(generation) {
                        log::debug!("Focus released after {:?}", hold);
                    }
                }
            }
        });

        self.focus_timer = Some(FocusTimer { cancel_tx, join });
    }
}

impl<S: FeedSource> Drop for Scanner<S> {
    fn drop(&mut self) {
        self.cancel_focus_timer();
    }
}

async fn fetch<S: FeedSource>(
    source: Arc<S>,
    position: GeoPosition,
) -> Result<(SatellitesResponse, AsteroidsResponse), FeedError> {
    let task = tokio::task::spawn_blocking(move || -> Result<_, FeedError> {
        let satellites = source.satellites(position, SATELLITE_SEARCH_RADIUS)?;
        let asteroids = source.asteroids(position, ASTEROID_SEARCH_RADIUS)?;
        Ok((satellites, asteroids))
    });

    task.await?
}

fn settle(view: &mut ViewState, fetched: Result<(SatellitesResponse, AsteroidsResponse), FeedError>) {
    let (satellites, asteroids) = match fetched {
        Ok(responses) => responses,
        Err(e) => return view.complete_scan(Err(e)),
    };

    let satellites = reshape_satellites(satellites);
    match reshape_asteroids(asteroids) {
        Ok(asteroids) => view.complete_scan(Ok(ScanData {
            satellites,
            asteroids,
        })),
        Err(e) => {
            view.replace_satellites(satellites);
            view.complete_scan(Err(e));
        }
    }
}
