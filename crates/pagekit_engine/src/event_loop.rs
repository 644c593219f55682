use pagekit_core::FrameTask;

/// Animation frames run on 16 ms boundaries of the virtual clock.
pub const FRAME_INTERVAL_MS: u64 = 16;

struct TimerEntry<T> {
    id: u64,
    fire_at: u64,
    payload: T,
}

/// Work that became due while advancing the clock.
pub(crate) enum Due<T> {
    Timer(T),
    /// A rendering opportunity; its callbacks are collected with `take_frame_tasks`.
    Frame,
}

/// Single-threaded virtual-time event loop: one-shot timers plus animation
/// frame callbacks. Time only moves when the owner calls `pop_due`/`advance_to`.
pub(crate) struct EventLoop<T> {
    now_ms: u64,
    timers: Vec<TimerEntry<T>>,
    next_timer_id: u64,
    frame_tasks: Vec<FrameTask>,
    render_requested: bool,
    frame_at: Option<u64>,
}

impl<T> EventLoop<T> {
    pub(crate) fn new() -> Self {
        Self {
            now_ms: 0,
            timers: Vec::new(),
            next_timer_id: 1,
            frame_tasks: Vec::new(),
            render_requested: false,
            frame_at: None,
        }
    }

    pub(crate) fn now(&self) -> u64 {
        self.now_ms
    }

    pub(crate) fn set_timeout(&mut self, payload: T, delay_ms: u64) {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        self.timers.push(TimerEntry {
            id,
            fire_at: self.now_ms.saturating_add(delay_ms),
            payload,
        });
    }

    pub(crate) fn request_frame(&mut self, task: FrameTask) {
        self.frame_tasks.push(task);
        self.schedule_frame();
    }

    /// Asks for a rendering step without a frame callback (scroll animation,
    /// intersection updates).
    pub(crate) fn request_render(&mut self) {
        self.render_requested = true;
        self.schedule_frame();
    }

    fn schedule_frame(&mut self) {
        if self.frame_at.is_none() {
            let next = (self.now_ms / FRAME_INTERVAL_MS + 1).saturating_mul(FRAME_INTERVAL_MS);
            self.frame_at = Some(next);
        }
    }

    pub(crate) fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn frame_scheduled(&self) -> bool {
        self.frame_at.is_some()
    }

    /// Pops the earliest work due at or before `until`, moving the clock to it.
    /// Timers due at the same instant as a frame run first.
    pub(crate) fn pop_due(&mut self, until: u64) -> Option<Due<T>> {
        let next_timer = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| (timer.fire_at, timer.id))
            .map(|(index, timer)| (index, timer.fire_at));

        match (next_timer, self.frame_at) {
            (Some((index, fire_at)), frame_at)
                if fire_at <= until && frame_at.map_or(true, |frame| fire_at <= frame) =>
            {
                let timer = self.timers.swap_remove(index);
                self.now_ms = self.now_ms.max(fire_at);
                Some(Due::Timer(timer.payload))
            }
            (_, Some(frame_at)) if frame_at <= until => {
                self.now_ms = self.now_ms.max(frame_at);
                self.frame_at = None;
                self.render_requested = false;
                Some(Due::Frame)
            }
            _ => None,
        }
    }

    /// Callbacks requested so far; anything requested afterwards waits for the next frame.
    pub(crate) fn take_frame_tasks(&mut self) -> Vec<FrameTask> {
        std::mem::take(&mut self.frame_tasks)
    }

    pub(crate) fn advance_to(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }

    /// Drops every pending timer and frame.
    pub(crate) fn clear(&mut self) {
        self.timers.clear();
        self.frame_tasks.clear();
        self.render_requested = false;
        self.frame_at = None;
    }
}
