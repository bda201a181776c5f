//! Action enum — all user-initiated intents the components can produce.

/// Unique identifier for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Rings,
    Gps,
    Visualizer,
    Music,
    VideoOverlay,
    MenuOverlay,
}

/// Functions reachable from the home menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFunction {
    Music,
    Camera,
    Lights,
    Engine,
}

impl MenuFunction {
    pub fn label(self) -> &'static str {
        match self {
            MenuFunction::Music => "MUSIC",
            MenuFunction::Camera => "CAMERA",
            MenuFunction::Lights => "LIGHTS",
            MenuFunction::Engine => "ENGINE",
        }
    }
}

/// All actions that flow through the app. Components produce them; the App
/// event-loop dispatches.
#[derive(Debug, Clone)]
pub enum Action {
    ToggleMenu,
    CloseMenu,
    RunMenuFunction(MenuFunction),
    /// Simulated voice trigger: indicator now, menu reveal 500 ms later.
    TriggerVoice,
    OpenCommandInput,
    SendCommand(String),
    CancelCommandInput,
    ToggleVideo,
    ToggleMusicPanel,
    RefreshMotor,
    Quit,
}
