//! 帧计时器
//!
//! 提供示例生命周期 `update(current_time, elapsed_time)` 所需的时间，
//! 并每秒统计一次帧率。

use std::time::{Duration, Instant};

/// 帧计时器
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    frame_count: u32,
    last_fps_update: Instant,
    fps: f32,
}

/// 一次 `tick` 的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// 自计时器创建以来的时间（秒）
    pub current: f64,
    /// 距离上一帧的时间（秒）
    pub elapsed: f64,
    /// 本帧刚刷新了帧率统计时为 `Some`
    pub fps: Option<f32>,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            frame_count: 0,
            last_fps_update: now,
            fps: 0.0,
        }
    }

    /// 推进一帧
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let current = now.duration_since(self.start).as_secs_f64();
        let elapsed = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        self.frame_count += 1;
        let mut fps = None;
        let since_update = now.duration_since(self.last_fps_update);
        if since_update >= Duration::from_secs(1) {
            self.fps = self.frame_count as f32 / since_update.as_secs_f32();
            self.frame_count = 0;
            self.last_fps_update = now;
            fps = Some(self.fps);
        }

        FrameTime { current, elapsed, fps }
    }

    /// 最近一次统计的帧率
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
