//! Radio station name above the radar.

use radar_core::constants::*;
use radar_core::draw::{DrawCommand, DrawList, ScreenRect};
use radar_core::types::Rgba;
use radar_core::world::RadioStation;

use crate::error::LayerError;
use crate::frame::FrameContext;

const RADIO_TEXT_COLOR: Rgba = Rgba::new(144, 96, 16, 255);

/// Stations with a label worth showing.
pub fn is_displayable(station: &RadioStation) -> bool {
    (0..=RADIO_MAX_STATION).contains(&station.id) && !station.name.is_empty()
}

pub fn draw(ctx: &FrameContext, out: &mut DrawList) -> Result<(), LayerError> {
    let Some(station) = ctx.world.radio().filter(is_displayable) else {
        return Ok(());
    };
    let vp = &ctx.viewport;
    let rect = ScreenRect::new(
        vp.center().x - RADIO_BOX_WIDTH * 0.5,
        vp.origin.y - RADIO_BOX_HEIGHT - RADIO_BOX_GAP,
        RADIO_BOX_WIDTH,
        RADIO_BOX_HEIGHT,
    );
    out.push(DrawCommand::Text {
        text: station.name,
        rect,
        font_size: RADIO_FONT_SIZE,
        color: RADIO_TEXT_COLOR,
        outline: Some(Rgba::BLACK),
    });
    Ok(())
}
