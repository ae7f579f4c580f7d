//! Scripted input sessions
//!
//! A script is a list of timed inputs replayed against a [`ScrollEngine`] on
//! a virtual clock, one tick per frame. It drives the `simulate` command and
//! makes whole interaction sequences easy to reproduce.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{EngineEvent, ScrollEngine};

fn default_frame_ms() -> u64 {
    16
}

fn default_duration_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Wheel { delta: f64 },
    Touch { delta: f64 },
    Navigate { anchor: String },
    Resize { width: f64, height: f64 },
    Jump { position: f64 },
    SuspendPin {
        #[serde(default)]
        immediate: bool,
    },
    ResumePin,
    RemoveSection { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Offset from the start of the session
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// The session keeps ticking until this offset, or longer while the
    /// engine is still busy
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut script: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        if script.frame_ms == 0 {
            return Err(crate::Error::Config("frame_ms must be positive".into()));
        }
        script.steps.sort_by_key(|s| s.at_ms);
        Ok(script)
    }

    fn last_step_ms(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.at_ms)
    }
}

/// Apply one input to the engine
pub fn apply(engine: &mut ScrollEngine, action: &ScriptAction, now: Duration) {
    debug!(?action, at = ?now, "script step");
    match action {
        ScriptAction::Wheel { delta } => engine.wheel(*delta, now),
        ScriptAction::Touch { delta } => engine.touch(*delta, now),
        ScriptAction::Navigate { anchor } => {
            engine.navigate_to(anchor, now);
        }
        ScriptAction::Resize { width, height } => engine.resize(*width, *height, now),
        ScriptAction::Jump { position } => engine.jump_to(*position, now),
        ScriptAction::SuspendPin { immediate } => {
            engine.suspend_pin(*immediate, now);
        }
        ScriptAction::ResumePin => {
            engine.resume_pin(now);
        }
        ScriptAction::RemoveSection { id } => {
            engine.remove_section(id);
        }
    }
}

/// Replay `script` and collect every event with the frame it surfaced in
///
/// Steps are applied before the tick of the first frame at or after their
/// offset. Ticking stops at `duration_ms` once the engine is idle.
pub fn run_script(engine: &mut ScrollEngine, script: &Script) -> Vec<(Duration, EngineEvent)> {
    let frame = script.frame_ms.max(1);
    let end = script.duration_ms.max(script.last_step_ms());
    // Guards against a session that never settles
    let hard_stop = end + 60_000;

    let mut log = Vec::new();
    let mut steps = script.steps.iter().peekable();
    let mut now_ms = 0;

    loop {
        let now = Duration::from_millis(now_ms);
        while let Some(step) = steps.next_if(|s| s.at_ms <= now_ms) {
            apply(engine, &step.action, now);
        }

        for event in engine.tick(now) {
            log.push((now, event));
        }

        let done = now_ms >= end && steps.peek().is_none() && engine.is_idle();
        if done || now_ms >= hard_stop {
            break;
        }
        now_ms += frame;
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::layout::PageLayout;

    const SCRIPT: &str = r##"
        frame_ms = 16
        duration_ms = 500

        [[steps]]
        at_ms = 0
        action = "navigate"
        anchor = "#contact"

        [[steps]]
        at_ms = 100
        action = "resize"
        width = 800.0
        height = 900.0
    "##;

    #[test]
    fn test_parse_script() {
        let script = Script::from_toml(SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 2);
        assert_eq!(
            script.steps[0].action,
            ScriptAction::Navigate {
                anchor: "#contact".into()
            }
        );
        assert_eq!(
            script.steps[1].action,
            ScriptAction::Resize {
                width: 800.0,
                height: 900.0
            }
        );
    }

    #[test]
    fn test_rejects_zero_frame() {
        assert!(Script::from_toml("frame_ms = 0").is_err());
    }

    #[test]
    fn test_run_reaches_target_and_settles() {
        let script = Script::from_toml(SCRIPT).unwrap();
        let mut engine = ScrollEngine::new(PageLayout::portfolio(), AppConfig::default()).unwrap();
        let log = run_script(&mut engine, &script);

        assert!(log
            .iter()
            .any(|(_, e)| matches!(e, EngineEvent::PinModeChanged { enabled: false })));
        assert!(log
            .iter()
            .any(|(_, e)| matches!(e, EngineEvent::ScrollFinished { .. })));

        let contact = engine.geometry().rect("contact").unwrap().top;
        assert_eq!(engine.position(), contact);
        assert!(engine.is_idle());
        assert_eq!(engine.active_link(), Some("#contact"));
    }

    #[test]
    fn test_steps_apply_in_time_order() {
        let script = Script::from_toml(
            r##"
            duration_ms = 0

            [[steps]]
            at_ms = 40
            action = "jump"
            position = 900.0

            [[steps]]
            at_ms = 10
            action = "jump"
            position = 300.0
            "##,
        )
        .unwrap();
        assert_eq!(script.steps[0].at_ms, 10);

        let mut config = AppConfig::default();
        config.pin.snap_enabled = false;
        let mut engine = ScrollEngine::new(PageLayout::portfolio(), config).unwrap();
        run_script(&mut engine, &script);
        assert_eq!(engine.position(), 900.0);
    }
}
