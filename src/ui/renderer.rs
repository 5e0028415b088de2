//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: `UIViewModel` → ANSI frame
//!
//! The frame is returned as a string; the shell clears the screen and writes
//! it in one go.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the whole screen for a terminal of `rows` x `cols`.
///
/// # Example
///
/// ```rust
/// use vcfinder::app::AppState;
/// use vcfinder::domain::Corpus;
/// use vcfinder::preferences::ThemePreference;
/// use vcfinder::ui::render;
///
/// let state = AppState::new(Corpus::embedded()?, ThemePreference::default());
/// let frame = render(&state, 24, 80);
/// assert!(frame.contains("Ready to find your perfect VC match?"));
/// # Ok::<(), vcfinder::VcFinderError>(())
/// ```
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, state.theme.apply(), rows, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 2);
    components::render_layout(&mut out, vm, theme, cols, rows);
    out
}
