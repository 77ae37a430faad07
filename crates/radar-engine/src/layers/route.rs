//! GPS polyline, drawn into the render target under the player icon.

use radar_core::constants::{GPS_LINE_WIDTH, GPS_SCISSOR_INSET};
use radar_core::draw::{DrawCommand, DrawList, ScreenRect};

use crate::error::LayerError;
use crate::frame::FrameContext;
use crate::gps;

pub fn draw(ctx: &FrameContext, scissor: bool, out: &mut DrawList) -> Result<(), LayerError> {
    let Some(player) = ctx.player.as_ref() else {
        return Ok(());
    };
    let Some(points) = gps::plan(ctx.world, player)? else {
        return Ok(());
    };

    let side = ctx.rt_side as f32;
    let scissor = scissor.then(|| {
        ScreenRect::new(
            GPS_SCISSOR_INSET,
            GPS_SCISSOR_INSET,
            side - 2.0 * GPS_SCISSOR_INSET,
            side - 2.0 * GPS_SCISSOR_INSET,
        )
    });

    out.push(DrawCommand::Polyline {
        points,
        width: GPS_LINE_WIDTH * ctx.viewport.scale.uniform,
        view: ctx.view,
        scissor,
    });
    Ok(())
}
