use crate::{
    decoration::{model::DecorationState, model::StopId, update::Update},
    foundation::core::Color,
};

/// Request/response color chooser. Returning `None` means the user cancelled.
pub trait ColorDialog {
    fn pick(&mut self, initial: Color) -> Option<Color>;
}

impl<F> ColorDialog for F
where
    F: FnMut(Color) -> Option<Color>,
{
    fn pick(&mut self, initial: Color) -> Option<Color> {
        self(initial)
    }
}

/// Ask `dialog` for a new color for stop `id`; cancellation leaves the state unchanged.
pub fn recolor_stop(
    state: DecorationState,
    id: StopId,
    dialog: &mut dyn ColorDialog,
) -> DecorationState {
    let Some(initial) = state
        .background
        .gradient
        .stops
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.color)
    else {
        return state;
    };
    let color = dialog.pick(initial);
    if color.is_none() {
        tracing::debug!(stop = id.0, "color dialog cancelled");
    }
    state.apply(Update::RecolorGradientStop { id, color })
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/picker.rs"]
mod tests;
