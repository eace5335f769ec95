use crate::host::{ViewerGeometry, ViewerHost};
use crate::{ViewerCommand, ViewerUpdate};
use pdf_view_core::{Debouncer, DocumentSource, ViewerOptions};
use tokio::sync::mpsc;

/// Async worker task that owns the viewer for one document, processes
/// commands and sends updates.
///
/// Returns when the command channel closes, after every in-flight resize
/// has finished.
pub async fn worker_task<D: DocumentSource>(
    document: D,
    options: ViewerOptions,
    geometry: ViewerGeometry,
    mut command_rx: mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: mpsc::UnboundedSender<ViewerUpdate>,
) {
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel();
    let mut resize = ResizeDebounce::new(Debouncer::new(options.resize_debounce()), settled_tx);

    let mut host = match ViewerHost::open(document, options, geometry).await {
        Ok(host) => {
            let _ = update_tx.send(ViewerUpdate::Loaded {
                page_count: host.page_count(),
                zoom_factor: host.zoom().zoom_factor(),
            });
            host
        }
        Err(e) => {
            let _ = update_tx.send(ViewerUpdate::Error {
                message: format!("Failed to open document: {}", e),
            });
            return;
        }
    };

    loop {
        tokio::select! {
            cmd = command_rx.recv() => match cmd {
                Some(cmd) => process_command(cmd, &mut host, &mut resize, &mut command_rx, &update_tx),
                None => break,
            },
            Some(()) = settled_rx.recv() => {
                if let Some(geometry) = resize.take() {
                    log::debug!("Applying window resize to {:?}", geometry.container);
                    send_all(&update_tx, host.apply(ViewerCommand::WindowResized(geometry)));
                }
            }
            Some(update) = host.next_resize(), if host.has_pending_resizes() => {
                let _ = update_tx.send(update);
            }
        }
    }

    send_all(&update_tx, host.finish_resizes().await);
    log::debug!("Viewer worker stopped");
}

fn process_command<D: DocumentSource>(
    cmd: ViewerCommand,
    host: &mut ViewerHost<D>,
    resize: &mut ResizeDebounce,
    command_rx: &mut mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: &mpsc::UnboundedSender<ViewerUpdate>,
) {
    match cmd {
        ViewerCommand::WindowResized(geometry) => resize.schedule(geometry),
        ViewerCommand::Scroll { mut top } => {
            // Drain any queued scroll commands, keeping only the most recent
            let mut deferred = None;
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let ViewerCommand::Scroll { top: newer } = next_cmd {
                    log::debug!("Discarding queued scroll, using newer offset");
                    top = newer;
                } else {
                    // Non-scroll command: apply the scroll first, then this one
                    deferred = Some(next_cmd);
                    break;
                }
            }

            send_all(update_tx, host.apply(ViewerCommand::Scroll { top }));
            if let Some(next_cmd) = deferred {
                process_command(next_cmd, host, resize, command_rx, update_tx);
            }
        }
        cmd => send_all(update_tx, host.apply(cmd)),
    }
}

/// Holds the latest window geometry until a burst of resizes settles
struct ResizeDebounce {
    debouncer: Debouncer,
    pending: Option<ViewerGeometry>,
    settled_tx: mpsc::UnboundedSender<()>,
}

impl ResizeDebounce {
    fn new(debouncer: Debouncer, settled_tx: mpsc::UnboundedSender<()>) -> Self {
        Self {
            debouncer,
            pending: None,
            settled_tx,
        }
    }

    fn schedule(&mut self, geometry: ViewerGeometry) {
        self.pending = Some(geometry);
        let debouncer = self.debouncer.clone();
        let settled_tx = self.settled_tx.clone();
        tokio::spawn(async move {
            if debouncer.settle().await {
                let _ = settled_tx.send(());
            }
        });
    }

    fn take(&mut self) -> Option<ViewerGeometry> {
        self.pending.take()
    }
}

fn send_all(update_tx: &mpsc::UnboundedSender<ViewerUpdate>, updates: Vec<ViewerUpdate>) {
    for update in updates {
        let _ = update_tx.send(update);
    }
}
