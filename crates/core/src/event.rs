/// All messages that can flow through the dashboard's event loop.
///
/// Sources:
/// - Refresh timer        → `Tick`
/// - Terminal input       → `Resize`, `Reset`, `ToggleSmooth`, `Quit`
/// - Config watcher task  → `ConfigReloaded`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // ── Timer ─────────────────────────────────────────────────────────────────
    /// Poll every source and advance every graph by one sample.
    Tick,

    // ── Terminal ──────────────────────────────────────────────────────────────
    /// Terminal resized to `(cols, rows)`; graphs rebuild on the next draw.
    Resize(u16, u16),
    /// Clear all graph history and re-seed the scales.
    Reset,
    /// Switch between whole-cell and sub-cell bar rendering.
    ToggleSmooth,
    /// Leave the dashboard.
    Quit,

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,
}
