//! A frameless winit window with custom chrome.
//!
//! Drag the window by its title bar, click the caption buttons at the right
//! edge, and resize from the invisible border. Mask pushes are logged
//! under `lattice_chrome::chrome`.
//!
//! Run with: RUST_LOG=lattice_chrome=debug cargo run -p lattice-chrome --example frameless_window

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lattice_chrome::TaskQueue;
use lattice_chrome::render::{Rect, Size};
use lattice_chrome::widget::{ChromeWidget, Element};
use lattice_chrome::window::{HostWindow, WinitHostWindow};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

struct Chrome {
    host: Arc<WinitHostWindow>,
    _chrome: ChromeWidget,
}

struct App {
    queue: Arc<TaskQueue>,
    close_requested: Arc<AtomicBool>,
    window: Option<Chrome>,
}

impl App {
    fn new() -> Self {
        Self {
            queue: Arc::new(TaskQueue::new()),
            close_requested: Arc::new(AtomicBool::new(false)),
            window: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let host = match WinitHostWindow::create(event_loop, "Lattice Chrome", Size::new(960, 640)) {
            Ok(host) => Arc::new(host),
            Err(error) => {
                tracing::error!(%error, "failed to create window");
                event_loop.exit();
                return;
            }
        };
        let host_dyn: Arc<dyn HostWindow> = host.clone();

        let chrome = ChromeWidget::new(&host_dyn, &self.queue);
        chrome.set_left_title_bar_widget(
            Some(Arc::new(Element::new("menu", Rect::new(0, 0, 120, 30)))),
            false,
        );
        chrome.set_central_widget(Some(Arc::new(Element::new("content", Rect::ZERO))));

        let close_requested = self.close_requested.clone();
        host.signals().close_requested.connect(move |_| {
            close_requested.store(true, Ordering::SeqCst);
        });

        host.show();
        self.window = Some(Chrome {
            host,
            _chrome: chrome,
        });
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = &self.window else {
            return;
        };
        if window.host.id() != window_id {
            return;
        }

        if let Err(error) = window.host.handle_window_event(&event) {
            tracing::warn!(%error, "window operation failed");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.queue.run_turn();
        if self.close_requested.load(Ordering::SeqCst) {
            self.window = None;
            event_loop.exit();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
