//! The chrome widget and its reconciliation pass.
//!
//! [`ChromeWidget`] owns a title bar and a central widget and keeps the host
//! window's hit-test masks in step with them. It never pushes masks from
//! inside an event handler: every trigger (a host window signal, the title
//! bar being shown, any setter) only schedules a [`DeferredCall`], and all
//! triggers within one event-loop turn collapse into a single pass that
//! reads the state current at execution time.
//!
//! # Pass
//!
//! A pass is skipped when the host window is gone, hidden or minimized.
//! Otherwise it:
//!
//! 1. resolves the frame style (border and corner radius),
//! 2. syncs the title bar's maximized flag and visibility,
//! 3. unless full-screen, lays out the title bar and pushes the title-bar
//!    height, icon width, interactive islands and caption-button masks,
//! 4. propagates activation to the title bar and refreshes it.
//!
//! The rounded content mask is maintained by a second, independent deferred
//! call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use lattice_chrome_core::logging::{span_names, targets};
use lattice_chrome_core::{ConnectionScope, DeferredCall, PerfSpan, Signal, TaskQueue};
use lattice_chrome_render::{AlphaMask, Color, Rect, Region, Size};

use super::config::ChromeConfig;
use super::element::Widget;
use super::frame_style::{DEFAULT_ACTIVE_BORDER_COLOR, FrameStyle};
use super::regions::{
    CaptionButtonRects, RegionInput, SlotShape, compute_regions, rounded_content_mask,
};
use super::standard_title_bar::StandardTitleBar;
use super::title_bar::{TitleAlignment, TitleBar, TitleBarSlot};
use crate::platform::{self, PlatformChrome};
use crate::window::HostWindow;

/// Reconciliation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateStats {
    /// Update requests, coalesced or not.
    pub requests: u64,
    /// Passes that ran to completion.
    pub executed: u64,
    /// Passes aborted by the guard (host gone, hidden or minimized).
    pub skipped: u64,
    /// Whether a pass is pending.
    pub pending: bool,
}

struct ChromeState {
    config: ChromeConfig,
    slot_transparent: [bool; 3],
    title_bar_mask: Option<Region>,
    central_widget: Option<Arc<dyn Widget>>,
    frame_style: FrameStyle,
    content_mask: Option<AlphaMask>,
    native_caption_buttons: bool,
}

struct ChromeInner {
    host: Weak<dyn HostWindow>,
    title_bar: Arc<dyn TitleBar>,
    platform: Arc<dyn PlatformChrome>,
    state: Mutex<ChromeState>,
    update: DeferredCall,
    content_update: DeferredCall,
    connections: Mutex<ConnectionScope>,
    executed: AtomicU64,
    skipped: AtomicU64,
    content_mask_changed: Signal<Option<AlphaMask>>,
}

/// Custom window chrome bound to a host window.
///
/// `ChromeWidget` is a cheap handle; clones drive the same chrome. The host
/// window is held weakly, so dropping the window simply turns later passes
/// into no-ops.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lattice_chrome::TaskQueue;
/// use lattice_chrome::render::{Rect, Size};
/// use lattice_chrome::widget::{ChromeWidget, Element};
/// use lattice_chrome::window::{HostWindow, MaskedHostWindow};
///
/// let queue = Arc::new(TaskQueue::new());
/// let host = Arc::new(MaskedHostWindow::new(Size::new(800, 600)));
/// let host_dyn: Arc<dyn HostWindow> = host.clone();
/// let chrome = ChromeWidget::new(&host_dyn, &queue);
///
/// let search = Element::new("search", Rect::new(0, 0, 160, 30));
/// chrome.set_left_title_bar_widget(Some(Arc::new(search)), false);
///
/// host.show();
/// queue.run_turn();
///
/// // The search box is an interactive island; the rest of the band drags.
/// let masks = host.masks();
/// assert!(masks.title_bar.contains_xy(100, 10));
/// assert!(!masks.title_bar.contains_xy(400, 10));
/// ```
#[derive(Clone)]
pub struct ChromeWidget {
    inner: Arc<ChromeInner>,
}

impl ChromeWidget {
    /// Create a chrome with a [`StandardTitleBar`], the running platform's
    /// behavior and the default config.
    pub fn new(host: &Arc<dyn HostWindow>, queue: &Arc<TaskQueue>) -> Self {
        Self::with_parts(
            host,
            Arc::new(StandardTitleBar::new()),
            platform::current(),
            queue,
            ChromeConfig::default(),
        )
    }

    /// Create a chrome from explicit parts.
    pub fn with_parts(
        host: &Arc<dyn HostWindow>,
        title_bar: Arc<dyn TitleBar>,
        platform: Arc<dyn PlatformChrome>,
        queue: &Arc<TaskQueue>,
        config: ChromeConfig,
    ) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<ChromeInner>| {
            let update_target = weak.clone();
            let content_target = weak.clone();
            ChromeInner {
                host: Arc::downgrade(host),
                title_bar,
                platform,
                state: Mutex::new(ChromeState {
                    config,
                    slot_transparent: [false; 3],
                    title_bar_mask: None,
                    central_widget: None,
                    frame_style: FrameStyle::default(),
                    content_mask: None,
                    native_caption_buttons: false,
                }),
                update: DeferredCall::new(queue, move || {
                    if let Some(inner) = update_target.upgrade() {
                        inner.reconcile();
                    }
                }),
                content_update: DeferredCall::new(queue, move || {
                    if let Some(inner) = content_target.upgrade() {
                        inner.update_content_mask();
                    }
                }),
                connections: Mutex::new(ConnectionScope::new()),
                executed: AtomicU64::new(0),
                skipped: AtomicU64::new(0),
                content_mask_changed: Signal::new(),
            }
        });

        inner.apply_config();
        inner.connect_host(host.as_ref());
        inner.connect_title_bar();
        inner.title_bar.set_title(&host.title());
        if inner.platform.manages_native_caption_buttons() {
            inner.sync_native_caption_buttons();
        }

        tracing::debug!(
            target: targets::CHROME,
            platform = inner.platform.name(),
            connections = inner.connections.lock().len(),
            "chrome widget created"
        );
        Self { inner }
    }

    // =========================================================================
    // Title Bar Options
    // =========================================================================

    /// Show or hide the title bar.
    ///
    /// Where the OS draws caption buttons, their visibility follows.
    pub fn set_title_bar_visible(&self, visible: bool) {
        self.inner.state.lock().config.title_bar_visible = visible;
        if self.inner.platform.manages_native_caption_buttons()
            && let Some(host) = self.inner.host.upgrade()
        {
            host.set_native_caption_buttons_visible(visible);
        }
        self.update_window();
    }

    /// Show or hide the caption buttons.
    ///
    /// Hiding them clears the host's button masks right away.
    pub fn set_caption_buttons_visible(&self, visible: bool) {
        let native = {
            let mut state = self.inner.state.lock();
            state.config.caption_buttons_visible = visible;
            state.native_caption_buttons
        };
        self.inner
            .title_bar
            .set_caption_buttons_visible(visible && !native);
        if !visible {
            self.inner.clear_button_masks();
        }
        self.update_window();
    }

    /// Show or hide the title text.
    pub fn set_title_visible(&self, visible: bool) {
        self.inner.state.lock().config.title_visible = visible;
        self.inner.title_bar.set_title_visible(visible);
        self.update_window();
    }

    /// Show or hide the icon.
    pub fn set_icon_visible(&self, visible: bool) {
        let native = {
            let mut state = self.inner.state.lock();
            state.config.icon_visible = visible;
            state.native_caption_buttons
        };
        self.inner.title_bar.set_icon_visible(visible && !native);
        self.update_window();
    }

    /// Set the system-menu width used while the icon is hidden.
    pub fn set_icon_width(&self, width: i32) {
        self.inner.state.lock().config.icon_width = width.max(0);
        self.update_window();
    }

    /// Set the width of each caption button.
    pub fn set_caption_button_width(&self, width: i32) {
        let width = width.max(0);
        self.inner.state.lock().config.caption_button_width = width;
        self.inner.title_bar.set_caption_button_width(width);
        self.update_window();
    }

    /// Set the title-bar height.
    pub fn set_title_bar_height(&self, height: i32) {
        let height = height.max(0);
        self.inner.state.lock().config.title_bar_height = height;
        self.inner.title_bar.set_fixed_height(height);
        self.update_window();
    }

    /// Set the title alignment.
    pub fn set_title_alignment(&self, alignment: TitleAlignment) {
        self.inner.state.lock().config.title_alignment = alignment;
        self.inner.title_bar.set_title_alignment(alignment);
        self.update_window();
    }

    /// Set the title-bar background color.
    ///
    /// Ignored while the title bar is unified with the content.
    pub fn set_title_bar_color(&self, color: Option<Color>) {
        {
            let mut state = self.inner.state.lock();
            if state.config.unified_title_bar_and_content {
                tracing::trace!(target: targets::CHROME, "title-bar color ignored while unified");
                return;
            }
            state.config.title_bar_color = color;
        }
        self.inner.title_bar.set_background_color(color);
        self.update_window();
    }

    /// Set the active border color; `None` restores the default.
    pub fn set_active_border_color(&self, color: Option<Color>) {
        self.inner.state.lock().config.active_border_color =
            color.unwrap_or(DEFAULT_ACTIVE_BORDER_COLOR);
        self.update_window();
    }

    /// Merge the title bar into the content area.
    ///
    /// Turning this on forces a transparent title bar; turning it off resets
    /// the title-bar color to the theme default.
    pub fn set_unified_title_bar_and_content(&self, unified: bool) {
        let color = unified.then_some(Color::TRANSPARENT);
        {
            let mut state = self.inner.state.lock();
            state.config.unified_title_bar_and_content = unified;
            state.config.title_bar_color = color;
        }
        self.inner.title_bar.set_background_color(color);
        self.update_window();
        self.inner.schedule_content_mask();
    }

    /// Replace every option at once.
    pub fn set_config(&self, config: ChromeConfig) {
        self.inner.state.lock().config = config;
        self.inner.apply_config();
        if !self.config().caption_buttons_visible {
            self.inner.clear_button_masks();
        }
        self.update_window();
    }

    // =========================================================================
    // Slots And Content
    // =========================================================================

    /// Install a title-bar slot widget, returning the previous one.
    ///
    /// With `transparent_for_mouse` set, the slot widget itself does not
    /// block dragging; its descendants still do unless they are mouse
    /// transparent themselves.
    pub fn set_slot_widget(
        &self,
        slot: TitleBarSlot,
        widget: Option<Arc<dyn Widget>>,
        transparent_for_mouse: bool,
    ) -> Option<Arc<dyn Widget>> {
        self.inner.state.lock().slot_transparent[slot.index()] = transparent_for_mouse;
        let previous = self.inner.title_bar.set_slot_widget(slot, widget);
        self.update_window();
        previous
    }

    /// Install the left title-bar widget, returning the previous one.
    pub fn set_left_title_bar_widget(
        &self,
        widget: Option<Arc<dyn Widget>>,
        transparent_for_mouse: bool,
    ) -> Option<Arc<dyn Widget>> {
        self.set_slot_widget(TitleBarSlot::Left, widget, transparent_for_mouse)
    }

    /// Install the center title-bar widget, returning the previous one.
    pub fn set_center_title_bar_widget(
        &self,
        widget: Option<Arc<dyn Widget>>,
        transparent_for_mouse: bool,
    ) -> Option<Arc<dyn Widget>> {
        self.set_slot_widget(TitleBarSlot::Center, widget, transparent_for_mouse)
    }

    /// Install the right title-bar widget, returning the previous one.
    pub fn set_right_title_bar_widget(
        &self,
        widget: Option<Arc<dyn Widget>>,
        transparent_for_mouse: bool,
    ) -> Option<Arc<dyn Widget>> {
        self.set_slot_widget(TitleBarSlot::Right, widget, transparent_for_mouse)
    }

    /// The widget installed in a slot.
    pub fn slot_widget(&self, slot: TitleBarSlot) -> Option<Arc<dyn Widget>> {
        self.inner.title_bar.slot_widget(slot)
    }

    /// Set an explicit mask of interactive islands, united with the slot
    /// regions on every pass.
    pub fn set_title_bar_mask(&self, mask: Option<Region>) {
        self.inner.state.lock().title_bar_mask = mask;
        self.update_window();
    }

    /// The explicit title-bar mask.
    pub fn title_bar_mask(&self) -> Option<Region> {
        self.inner.state.lock().title_bar_mask.clone()
    }

    /// Install the central widget, returning the previous one.
    pub fn set_central_widget(&self, widget: Option<Arc<dyn Widget>>) -> Option<Arc<dyn Widget>> {
        let previous = std::mem::replace(&mut self.inner.state.lock().central_widget, widget);
        self.update_window();
        self.inner.schedule_content_mask();
        previous
    }

    /// The central widget.
    pub fn central_widget(&self) -> Option<Arc<dyn Widget>> {
        self.inner.state.lock().central_widget.clone()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of the current options.
    pub fn config(&self) -> ChromeConfig {
        self.inner.state.lock().config.clone()
    }

    /// Check if the title bar is configured visible.
    pub fn is_title_bar_visible(&self) -> bool {
        self.inner.state.lock().config.title_bar_visible
    }

    /// Check if the caption buttons are configured visible.
    pub fn is_caption_buttons_visible(&self) -> bool {
        self.inner.state.lock().config.caption_buttons_visible
    }

    /// Title-bar height.
    pub fn title_bar_height(&self) -> i32 {
        self.inner.state.lock().config.title_bar_height
    }

    /// Caption-button width.
    pub fn caption_button_width(&self) -> i32 {
        self.inner.state.lock().config.caption_button_width
    }

    /// Title alignment.
    pub fn title_alignment(&self) -> TitleAlignment {
        self.inner.state.lock().config.title_alignment
    }

    /// Title-bar background color.
    pub fn title_bar_color(&self) -> Option<Color> {
        self.inner.state.lock().config.title_bar_color
    }

    /// Active border color.
    pub fn active_border_color(&self) -> Color {
        self.inner.state.lock().config.active_border_color
    }

    /// Check if the title bar is unified with the content.
    pub fn is_unified_title_bar_and_content(&self) -> bool {
        self.inner.state.lock().config.unified_title_bar_and_content
    }

    /// The title bar.
    pub fn title_bar(&self) -> &Arc<dyn TitleBar> {
        &self.inner.title_bar
    }

    /// The frame style resolved by the last pass.
    pub fn frame_style(&self) -> FrameStyle {
        self.inner.state.lock().frame_style
    }

    /// The current rounded content mask, `None` when unclipped.
    pub fn content_mask(&self) -> Option<AlphaMask> {
        self.inner.state.lock().content_mask.clone()
    }

    /// Emitted when the rounded content mask changes.
    pub fn content_mask_changed(&self) -> &Signal<Option<AlphaMask>> {
        &self.inner.content_mask_changed
    }

    /// Reconciliation counters.
    pub fn update_stats(&self) -> UpdateStats {
        let deferred = self.inner.update.stats();
        UpdateStats {
            requests: deferred.requests,
            executed: self.inner.executed.load(Ordering::Relaxed),
            skipped: self.inner.skipped.load(Ordering::Relaxed),
            pending: deferred.pending,
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Schedule a reconciliation pass on the next turn.
    pub fn update_window(&self) {
        self.inner.update.schedule();
    }

    /// Copy title-bar color, active border color and title alignment from
    /// another chrome (a parent window's, typically).
    ///
    /// A transparent base title-bar color is not copied.
    pub fn inherit_style(&self, base: &ChromeWidget) {
        let base = base.config();
        if base.title_bar_color.is_none_or(|c| !c.is_transparent()) {
            self.set_title_bar_color(base.title_bar_color);
        }
        self.set_active_border_color(Some(base.active_border_color));
        self.set_title_alignment(base.title_alignment);
    }
}

impl std::fmt::Debug for ChromeWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeWidget")
            .field("platform", &self.inner.platform.name())
            .field("stats", &self.update_stats())
            .finish_non_exhaustive()
    }
}

impl ChromeInner {
    fn schedule_update(&self) {
        self.update.schedule();
    }

    fn schedule_content_mask(&self) {
        if self.platform.supports_rounded_corners() {
            self.content_update.schedule();
        }
    }

    /// Push the config onto the title bar.
    fn apply_config(&self) {
        let (config, native) = {
            let state = self.state.lock();
            (state.config.clone(), state.native_caption_buttons)
        };
        let title_bar = &self.title_bar;
        title_bar.set_fixed_height(config.title_bar_height);
        title_bar.set_caption_button_width(config.caption_button_width);
        title_bar.set_caption_buttons_visible(config.caption_buttons_visible && !native);
        title_bar.set_icon_visible(config.icon_visible && !native);
        title_bar.set_title_visible(config.title_visible);
        title_bar.set_title_alignment(config.title_alignment);
        title_bar.set_background_color(config.title_bar_color);
    }

    fn clear_button_masks(&self) {
        if let Some(host) = self.host.upgrade() {
            host.set_minimize_mask(Region::new());
            host.set_maximize_mask(Region::new());
            host.set_close_mask(Region::new());
        }
    }

    fn connect_host(self: &Arc<Self>, host: &dyn HostWindow) {
        let signals = host.signals();
        let mut scope = self.connections.lock();

        let weak = Arc::downgrade(self);
        scope.add(signals.shown.connect_scoped(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_update();
                inner.schedule_content_mask();
            }
        }));
        let weak = Arc::downgrade(self);
        scope.add(signals.resized.connect_scoped(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_update();
                inner.schedule_content_mask();
            }
        }));
        let weak = Arc::downgrade(self);
        scope.add(signals.state_changed.connect_scoped(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_update();
                inner.schedule_content_mask();
            }
        }));
        let weak = Arc::downgrade(self);
        scope.add(signals.activated.connect_scoped(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_update();
            }
        }));
        let weak = Arc::downgrade(self);
        scope.add(signals.deactivated.connect_scoped(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_update();
            }
        }));

        let weak = Arc::downgrade(self);
        scope.add(signals.title_changed.connect_scoped(move |title| {
            if let Some(inner) = weak.upgrade() {
                inner.title_bar.set_title(title);
            }
        }));
        let weak = Arc::downgrade(self);
        scope.add(signals.icon_changed.connect_scoped(move |icon| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let scaled = match icon.as_ref().map(|icon| icon.for_title_bar()).transpose() {
                Ok(scaled) => scaled,
                Err(error) => {
                    tracing::warn!(target: targets::CHROME, %error, "failed to scale window icon");
                    None
                }
            };
            inner.title_bar.set_icon(scaled);
        }));

        if self.platform.manages_native_caption_buttons() {
            let weak = Arc::downgrade(self);
            scope.add(
                signals
                    .native_caption_buttons_changed
                    .connect_scoped(move |_| {
                        if let Some(inner) = weak.upgrade() {
                            inner.sync_native_caption_buttons();
                        }
                    }),
            );
        }
    }

    fn connect_title_bar(self: &Arc<Self>) {
        let signals = self.title_bar.signals();
        let mut scope = self.connections.lock();

        let weak = Arc::downgrade(self);
        scope.add(signals.shown.connect_scoped(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_update();
            }
        }));

        let host = self.host.clone();
        scope.add(signals.minimize_requested.connect_scoped(move |_| {
            if let Some(host) = host.upgrade() {
                host.show_minimized();
            }
        }));
        let host = self.host.clone();
        scope.add(signals.maximize_requested.connect_scoped(move |_| {
            if let Some(host) = host.upgrade() {
                host.show_maximized();
            }
        }));
        let host = self.host.clone();
        scope.add(signals.restore_requested.connect_scoped(move |_| {
            if let Some(host) = host.upgrade() {
                host.show_normal();
            }
        }));
        let host = self.host.clone();
        scope.add(signals.close_requested.connect_scoped(move |_| {
            if let Some(host) = host.upgrade() {
                host.close();
            }
        }));
    }

    /// Swap our caption buttons and icon for the OS-drawn ones, or back.
    fn sync_native_caption_buttons(&self) {
        let Some(host) = self.host.upgrade() else {
            return;
        };
        let native = self.platform.native_caption_buttons_active(host.as_ref());
        let config = {
            let mut state = self.state.lock();
            state.native_caption_buttons = native;
            state.config.clone()
        };

        if native {
            let rect = self.platform.native_caption_buttons_rect(host.as_ref());
            let margin = Size::new(rect.origin.x * 2 + rect.width(), rect.origin.y + rect.height());
            self.title_bar.set_caption_buttons_visible(false);
            self.title_bar.set_icon_visible(false);
            self.title_bar.set_left_margin(margin);
            self.clear_button_masks();
            tracing::debug!(target: targets::CHROME, ?margin, "native caption buttons shown");
        } else {
            self.title_bar
                .set_caption_buttons_visible(config.caption_buttons_visible);
            self.title_bar.set_icon_visible(config.icon_visible);
            self.title_bar.set_left_margin(Size::ZERO);
            tracing::debug!(target: targets::CHROME, "native caption buttons hidden");
        }
        self.schedule_update();
    }

    fn region_input(&self, slot_transparent: [bool; 3], override_mask: Option<Region>) -> RegionInput {
        let title_bar = &self.title_bar;
        let slots = TitleBarSlot::ALL.map(|slot| {
            title_bar.slot_widget(slot).map(|widget| {
                SlotShape::capture(
                    widget.as_ref(),
                    title_bar.slot_placeholder_pos(slot),
                    slot_transparent[slot.index()],
                )
            })
        });
        RegionInput {
            title_bar_width: title_bar.width(),
            slots,
            buttons: CaptionButtonRects {
                minimize: title_bar.minimize_button_rect(),
                maximize: title_bar.maximize_button_rect(),
                close: title_bar.close_button_rect(),
            },
            caption_buttons_visible: title_bar.caption_buttons_visible(),
            override_mask,
            content_size: Size::ZERO,
            rounded_content: false,
        }
    }

    /// The content placeholder's rectangle in window coordinates.
    fn content_rect(&self, window: Size, unified: bool) -> Rect {
        let top = if self.title_bar.is_visible() && !unified {
            self.title_bar.height().min(window.height.max(0))
        } else {
            0
        };
        Rect::new(0, top, window.width, window.height - top)
    }

    fn reconcile(&self) {
        let _span = tracing::debug_span!(target: targets::CHROME, span_names::RECONCILE).entered();

        let Some(host) = self.host.upgrade() else {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(target: targets::CHROME, "host window dropped, pass skipped");
            return;
        };
        if !host.is_visible() || host.is_minimized() {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                target: targets::CHROME,
                visible = host.is_visible(),
                minimized = host.is_minimized(),
                "pass skipped"
            );
            return;
        }
        let _perf = PerfSpan::new("reconcile");

        let window_state = host.window_state();
        let active = window_state.is_active();
        let full_screen = window_state.is_full_screen();
        let maximized = window_state.is_maximized();

        let (config, slot_transparent, override_mask, central_widget) = {
            let state = self.state.lock();
            (
                state.config.clone(),
                state.slot_transparent,
                state.title_bar_mask.clone(),
                state.central_widget.clone(),
            )
        };

        let frame_style = FrameStyle::resolve(
            !self.platform.borders_drawn_by_system(),
            window_state,
            config.active_border_color,
            self.platform.supports_rounded_corners(),
        );
        self.state.lock().frame_style = frame_style;

        let title_bar = &self.title_bar;
        title_bar.set_maximized(maximized && !full_screen);
        title_bar.set_visible(config.title_bar_visible && !full_screen);

        let size = host.size();
        if let Some(central) = central_widget {
            central.set_geometry(self.content_rect(size, config.unified_title_bar_and_content));
        }

        if !full_screen {
            title_bar.layout(size.width);

            let height = if title_bar.is_visible() {
                title_bar.height()
            } else {
                0
            };
            let icon_width = if title_bar.is_icon_visible() {
                title_bar.icon_widget_width()
            } else {
                config.icon_width
            };
            host.set_title_bar_height(height);
            host.set_icon_width(icon_width);

            let input = self.region_input(slot_transparent, override_mask);
            let regions = compute_regions(&input);
            if height == 0 {
                // No band to hit: nothing in the title bar may capture input.
                host.set_title_bar_mask(Region::new());
                host.set_minimize_mask(Region::new());
                host.set_maximize_mask(Region::new());
                host.set_close_mask(Region::new());
            } else {
                host.set_title_bar_mask(regions.drag);
                if input.caption_buttons_visible {
                    host.set_minimize_mask(Region::from_rect(regions.buttons.minimize));
                    host.set_maximize_mask(Region::from_rect(regions.buttons.maximize));
                    host.set_close_mask(Region::from_rect(regions.buttons.close));
                }
            }
        }

        title_bar.set_active(active);
        title_bar.refresh();

        self.executed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            target: targets::CHROME,
            ?window_state,
            full_screen,
            style = %frame_style.to_declaration(),
            "pass executed"
        );
    }

    fn update_content_mask(&self) {
        let _span =
            tracing::debug_span!(target: targets::CHROME, span_names::CONTENT_MASK).entered();

        let Some(host) = self.host.upgrade() else {
            return;
        };
        let unified = self.state.lock().config.unified_title_bar_and_content;
        let applies = host.is_visible()
            && host.window_state().is_normal()
            && self.platform.supports_rounded_corners();
        let content = self.content_rect(host.size(), unified);
        let mask = rounded_content_mask(content.size, applies);

        let changed = {
            let mut state = self.state.lock();
            if state.content_mask == mask {
                false
            } else {
                state.content_mask = mask.clone();
                true
            }
        };
        if changed {
            tracing::debug!(
                target: targets::CHROME,
                clipped = mask.is_some(),
                size = ?content.size,
                "content mask changed"
            );
            self.content_mask_changed.emit(mask);
        }
    }
}

static_assertions::assert_impl_all!(ChromeWidget: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LinuxChrome, MacChrome, WindowsChrome};
    use crate::widget::Element;
    use crate::window::{MaskedHostWindow, WindowState};

    struct Fixture {
        queue: Arc<TaskQueue>,
        host: Arc<MaskedHostWindow>,
        title_bar: Arc<StandardTitleBar>,
        chrome: ChromeWidget,
    }

    fn fixture(platform: Arc<dyn PlatformChrome>) -> Fixture {
        let queue = Arc::new(TaskQueue::new());
        let host = Arc::new(MaskedHostWindow::new(Size::new(800, 600)));
        let host_dyn: Arc<dyn HostWindow> = host.clone();
        let title_bar = Arc::new(StandardTitleBar::new());
        let chrome = ChromeWidget::with_parts(
            &host_dyn,
            title_bar.clone(),
            platform,
            &queue,
            ChromeConfig::default(),
        );
        Fixture {
            queue,
            host,
            title_bar,
            chrome,
        }
    }

    #[test]
    fn test_hidden_host_skips_pass() {
        let f = fixture(Arc::new(LinuxChrome));
        f.chrome.update_window();
        f.queue.run_turn();

        let stats = f.chrome.update_stats();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.executed, 0);
        assert_eq!(f.host.masks().pushes, 0);
    }

    #[test]
    fn test_minimized_host_skips_pass() {
        let f = fixture(Arc::new(LinuxChrome));
        f.host.show();
        f.host.show_minimized();
        f.queue.run_turn();

        assert_eq!(f.chrome.update_stats().skipped, 1);
        assert_eq!(f.host.masks().pushes, 0);
    }

    #[test]
    fn test_pass_pushes_masks() {
        let f = fixture(Arc::new(LinuxChrome));
        f.host.show();
        f.queue.run_turn();

        let masks = f.host.masks();
        assert_eq!(masks.title_bar_height, 30);
        assert_eq!(masks.icon_width, 30);
        assert_eq!(masks.minimize, Region::from_rect(Rect::new(692, 0, 36, 30)));
        assert_eq!(masks.maximize, Region::from_rect(Rect::new(728, 0, 36, 30)));
        assert_eq!(masks.close, Region::from_rect(Rect::new(764, 0, 36, 30)));
        assert!(masks.title_bar.is_empty());
        assert_eq!(f.title_bar.refresh_count(), 1);
    }

    #[test]
    fn test_hidden_icon_uses_configured_width() {
        let f = fixture(Arc::new(LinuxChrome));
        f.chrome.set_icon_visible(false);
        f.chrome.set_icon_width(12);
        f.host.show();
        f.queue.run_turn();

        assert_eq!(f.host.masks().icon_width, 12);
    }

    #[test]
    fn test_hidden_title_bar_pushes_zero_height() {
        let f = fixture(Arc::new(LinuxChrome));
        f.chrome.set_title_bar_visible(false);
        f.host.show();
        f.queue.run_turn();

        assert_eq!(f.host.masks().title_bar_height, 0);
        assert!(!f.title_bar.is_visible());
    }

    #[test]
    fn test_title_bar_shown_triggers_pass() {
        let f = fixture(Arc::new(LinuxChrome));
        f.chrome.set_title_bar_visible(false);
        f.host.show();
        f.queue.run_turn();

        f.chrome.set_title_bar_visible(true);
        f.queue.run_turn();
        // The title bar became visible during that pass and asked for another.
        assert!(f.chrome.update_stats().pending);
        f.queue.run_turn();

        assert_eq!(f.host.masks().title_bar_height, 30);
        assert!(!f.chrome.update_stats().pending);
    }

    #[test]
    fn test_frame_style_follows_state() {
        let f = fixture(Arc::new(LinuxChrome));
        f.host.show();
        f.host.set_active(true);
        f.queue.run_turn();
        assert_eq!(
            f.chrome.frame_style().border.map(|b| b.color),
            Some(DEFAULT_ACTIVE_BORDER_COLOR)
        );
        assert_eq!(f.chrome.frame_style().corner_radius, 8);

        f.host.show_maximized();
        f.queue.run_turn();
        assert!(f.chrome.frame_style().is_plain());
        assert!(f.title_bar.is_maximized());
    }

    #[test]
    fn test_system_borders_not_drawn() {
        let f = fixture(Arc::new(WindowsChrome::windows11()));
        f.host.show();
        f.queue.run_turn();

        let style = f.chrome.frame_style();
        assert!(style.border.is_none());
        assert_eq!(style.corner_radius, 0);
    }

    #[test]
    fn test_full_screen_skips_push() {
        let f = fixture(Arc::new(LinuxChrome));
        f.host.show();
        f.queue.run_turn();
        let pushes = f.host.masks().pushes;

        f.host.set_full_screen(true);
        f.queue.run_turn();

        assert_eq!(f.host.masks().pushes, pushes);
        assert!(!f.title_bar.is_visible());
        assert!(!f.title_bar.is_maximized());
        assert_eq!(f.chrome.update_stats().executed, 2);
    }

    #[test]
    fn test_active_border_color_reset() {
        let f = fixture(Arc::new(LinuxChrome));
        f.chrome.set_active_border_color(Some(Color::rgb(255, 0, 0)));
        assert_eq!(f.chrome.active_border_color(), Color::rgb(255, 0, 0));

        f.chrome.set_active_border_color(None);
        assert_eq!(f.chrome.active_border_color(), DEFAULT_ACTIVE_BORDER_COLOR);
    }

    #[test]
    fn test_unified_controls_title_bar_color() {
        let f = fixture(Arc::new(LinuxChrome));
        f.chrome.set_title_bar_color(Some(Color::rgb(32, 32, 32)));

        f.chrome.set_unified_title_bar_and_content(true);
        assert_eq!(f.chrome.title_bar_color(), Some(Color::TRANSPARENT));
        f.chrome.set_title_bar_color(Some(Color::WHITE));
        assert_eq!(f.title_bar.background_color(), Some(Color::TRANSPARENT));

        f.chrome.set_unified_title_bar_and_content(false);
        assert_eq!(f.chrome.title_bar_color(), None);
        assert_eq!(f.title_bar.background_color(), None);
    }

    #[test]
    fn test_set_slot_returns_previous() {
        let f = fixture(Arc::new(LinuxChrome));
        let first: Arc<dyn Widget> = Arc::new(Element::new("a", Rect::new(0, 0, 10, 30)));

        assert!(f.chrome.set_right_title_bar_widget(Some(first.clone()), false).is_none());
        let previous = f.chrome.set_right_title_bar_widget(None, false);
        assert!(previous.is_some_and(|p| Arc::ptr_eq(&p, &first)));
    }

    #[test]
    fn test_central_widget_fills_content_area() {
        let f = fixture(Arc::new(LinuxChrome));
        let content = Element::new("content", Rect::ZERO);
        f.chrome.set_central_widget(Some(Arc::new(content.clone())));
        f.host.show();
        f.queue.run_turn();

        assert_eq!(content.geometry(), Rect::new(0, 30, 800, 570));
    }

    #[test]
    fn test_content_mask_only_when_normal() {
        let f = fixture(Arc::new(LinuxChrome));
        f.host.show();
        f.queue.run_turn();
        let mask = f.chrome.content_mask().unwrap();
        assert_eq!(mask.size(), Size::new(800, 570));

        f.host.show_maximized();
        f.queue.run_turn();
        assert!(f.chrome.content_mask().is_none());
    }

    #[test]
    fn test_no_content_mask_without_rounding() {
        let f = fixture(Arc::new(WindowsChrome::windows10()));
        f.host.show();
        f.queue.run_turn();
        assert!(f.chrome.content_mask().is_none());
    }

    #[test]
    fn test_native_caption_buttons_reserve_margin() {
        let f = fixture(Arc::new(MacChrome));
        f.host.set_native_caption_buttons_rect(Rect::new(8, 6, 52, 16));
        f.host.set_native_caption_buttons_visible(true);

        assert!(!f.title_bar.caption_buttons_visible());
        assert!(!f.title_bar.is_icon_visible());
        assert_eq!(f.title_bar.left_margin(), Size::new(68, 22));

        f.host.set_native_caption_buttons_visible(false);
        assert!(f.title_bar.caption_buttons_visible());
        assert!(f.title_bar.is_icon_visible());
        assert_eq!(f.title_bar.left_margin(), Size::ZERO);
    }

    #[test]
    fn test_title_bar_visibility_drives_native_buttons_on_mac() {
        let f = fixture(Arc::new(MacChrome));
        f.chrome.set_title_bar_visible(true);
        assert!(f.host.native_caption_buttons_visible());

        f.chrome.set_title_bar_visible(false);
        assert!(!f.host.native_caption_buttons_visible());
    }

    #[test]
    fn test_dropped_host_skips_pass() {
        let queue = Arc::new(TaskQueue::new());
        let host: Arc<dyn HostWindow> = Arc::new(MaskedHostWindow::new(Size::new(800, 600)));
        let chrome = ChromeWidget::with_parts(
            &host,
            Arc::new(StandardTitleBar::new()),
            Arc::new(LinuxChrome),
            &queue,
            ChromeConfig::default(),
        );
        drop(host);

        chrome.update_window();
        queue.run_turn();
        assert_eq!(chrome.update_stats().skipped, 1);
    }

    #[test]
    fn test_state_is_read_at_execution() {
        let f = fixture(Arc::new(LinuxChrome));
        f.host.show();
        f.host.set_window_state(WindowState::MAXIMIZED);
        f.host.set_window_state(WindowState::NO_STATE);
        f.queue.run_turn();

        assert_eq!(f.chrome.update_stats().executed, 1);
        assert!(!f.title_bar.is_maximized());
    }
}
