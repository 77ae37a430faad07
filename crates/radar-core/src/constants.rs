//! Radar constants and tuning parameters.
//!
//! Distances are host world units, angles radians unless the name says
//! otherwise, times milliseconds of host clock.

use std::f32::consts::PI;

// --- World / radar space ---

/// Translation from host world (x, y) to radar space.
pub const RADAR_OFFSET_X: f32 = 3000.0;

/// Translation from host world (x, y) to radar space.
pub const RADAR_OFFSET_Y: f32 = -3000.0;

/// Height at which flat radar-space points (blips, indicators, tile corners) are placed.
pub const RADAR_PLANE_Z: f32 = 0.1;

/// Side of the square world region covered by the map texture.
pub const MAP_WORLD_SIZE: f32 = 6000.0;

// --- Screen layout ---

/// Reference resolution that configured pixel sizes are authored for.
pub const BASE_SCREEN_WIDTH: f32 = 1920.0;

/// Reference resolution that configured pixel sizes are authored for.
pub const BASE_SCREEN_HEIGHT: f32 = 1080.0;

/// 2D blip icon size at the reference width.
pub const BLIP_ICON_SIZE: f32 = 24.0;

/// Compass-north marker size at the reference width.
pub const NORTH_MARKER_SIZE: f32 = 28.0;

/// Tracked ped/vehicle/marker indicator size at the reference width.
pub const INDICATOR_SIZE: f32 = 13.0;

/// Enemy missile indicator size at the reference width.
pub const MISSILE_INDICATOR_SIZE: f32 = 12.0;

/// Extra outline added around indicator glyphs for the black border pass.
pub const INDICATOR_BORDER_EXTRA: f32 = 6.0;

/// Altitude difference beyond which an object is drawn as above/below the player.
pub const HEIGHT_INDICATOR_THRESHOLD: f32 = 2.5;

// --- Projection ---

/// Near clipping plane of the radar camera.
pub const NEAR_PLANE: f32 = 0.3;

/// Far clipping plane of the radar camera.
pub const FAR_PLANE: f32 = 10_000.0;

/// Pull-back applied to the eye when the camera looks horizontally (scaled by tilt).
pub const EYE_PULLBACK: f32 = 600.0;

/// Degenerate-length threshold used by orbit math.
pub const ORBIT_EPSILON: f32 = 0.01;

/// Squared-length threshold under which a direction cannot be placed on the orbit.
pub const DIRECTION_EPSILON_SQ: f32 = 0.0001;

/// Ray parameter used for a square-edge axis the direction never reaches.
pub const EDGE_RAY_FAR: f32 = 1.0e6;

// --- Camera ---

/// On-foot / slow vehicle camera height.
pub const CAMERA_DEFAULT_HEIGHT: f32 = 445.0;

/// Default vertical field of view.
pub const CAMERA_DEFAULT_FOV: f32 = 70.0 * PI / 180.0;

/// Default backward offset of the camera from the player.
pub const CAMERA_DEFAULT_OFFSET_Y: f32 = -105.0;

/// Default camera pitch.
pub const CAMERA_DEFAULT_PITCH: f32 = -26.0 * PI / 180.0;

/// Steepest pitch, used by the overview mode.
pub const CAMERA_MAX_PITCH: f32 = -28.0 * PI / 180.0;

/// Fixed-wing camera height.
pub const CAMERA_PLANE_HEIGHT: f32 = 500.0;

/// Fixed-wing camera offset.
pub const CAMERA_PLANE_OFFSET_Y: f32 = -60.0;

/// Helicopter camera height.
pub const CAMERA_HELI_HEIGHT: f32 = 480.0;

/// Helicopter camera offset.
pub const CAMERA_HELI_OFFSET_Y: f32 = -75.0;

/// Fast ground vehicle camera height.
pub const CAMERA_FAST_HEIGHT: f32 = 471.25;

/// Fast ground vehicle camera offset.
pub const CAMERA_FAST_OFFSET_Y: f32 = -81.25;

/// Fast ground vehicle field of view.
pub const CAMERA_FAST_FOV: f32 = 71.0 * PI / 180.0;

/// Below this speed the default target is used (km/h).
pub const CAMERA_SPEED_LOW_KMH: f32 = 60.0;

/// At or above this speed the fast target is used (km/h).
pub const CAMERA_SPEED_HIGH_KMH: f32 = 100.0;

/// Host velocity is in units per 1/50 s step.
pub const VELOCITY_STEPS_PER_SEC: f32 = 50.0;

/// Overview mode camera height.
pub const CAMERA_OVERVIEW_HEIGHT: f32 = 545.0;

/// Overview mode camera offset.
pub const CAMERA_OVERVIEW_OFFSET_Y: f32 = -15.0;

/// How long the overview mode lasts.
pub const CAMERA_OVERVIEW_DURATION_MS: u64 = 3000;

/// Fraction of the remaining distance to the target covered per tick.
pub const CAMERA_INTERP_RATE: f32 = 0.15;

/// Rate divisor while the overview mode is active.
pub const CAMERA_OVERVIEW_RATE_DIVISOR: f32 = 8.0;

/// Yaw change that invalidates the cached camera pose.
pub const CAMERA_CACHE_EPSILON: f32 = 0.001;

/// Height fallback numerator when the camera height collapses to zero.
pub const CAMERA_FALLBACK_SPAN: f32 = 3000.0;

// --- Map tiles ---

/// Total number of map tiles.
pub const MAP_TILE_COUNT: usize = 144;

/// Tiles per grid row.
pub const MAP_TILES_PER_ROW: usize = 12;

/// World size of one tile side.
pub const MAP_TILE_SIZE: f32 = MAP_WORLD_SIZE / MAP_TILES_PER_ROW as f32;

/// Visible radius widening in aircraft.
pub const VISIBLE_RADIUS_AIRCRAFT_FACTOR: f32 = 1.7;

/// Visible radius safety margin.
pub const VISIBLE_RADIUS_MARGIN: f32 = 1.4;

/// Visible radius widening for square content (the corners reach further).
pub const VISIBLE_RADIUS_SQUARE_FACTOR: f32 = 1.65;

// --- Blips ---

/// Highest sprite id served from the game atlas.
pub const MAX_BLIP_ID: i32 = 63;

/// Minimum spacing between blip rebuilds.
pub const BLIP_UPDATE_INTERVAL_MS: u64 = 50;

/// Size used when a blip texture reports no dimensions.
pub const BLIP_FALLBACK_SIZE: f32 = 16.0;

/// Base size of the 3D player icon at the default camera height.
pub const PLAYER_ICON_SIZE: f32 = 17.0;

/// Depth step between stacked 3D icons.
pub const PLAYER_ICON_DEPTH_STEP: f32 = 0.01;

/// Max respawn points of each kind added as extra icons.
pub const MAX_RESPAWN_ICONS: usize = 10;

/// Entrance names are compared on this many leading bytes.
pub const ENTRANCE_NAME_LEN: usize = 8;

// --- Gang zones ---

/// Zones whose center is further than this from the camera are skipped.
pub const GANG_ZONE_MAX_RENDER_DISTANCE: f32 = 4000.0;

/// Smallest accepted zone side.
pub const GANG_ZONE_MIN_SIZE: f32 = 5.0;

/// Largest accepted zone side.
pub const GANG_ZONE_MAX_SIZE: f32 = 600.0;

/// Padding added to each zone side so neighbours overlap.
pub const GANG_ZONE_OVERLAP: f32 = 0.001;

/// Zone cache refresh interval.
pub const GANG_ZONE_CACHE_INTERVAL_MS: u64 = 1000;

/// Alpha of zone fills.
pub const GANG_ZONE_ALPHA: u8 = 140;

/// Shared depth of all zone quads.
pub const GANG_ZONE_Z: f32 = 1.0;

// --- GPS ---

/// Route line width at the reference resolution.
pub const GPS_LINE_WIDTH: f32 = 6.0;

/// Route line depth.
pub const GPS_LINE_Z: f32 = 0.02;

/// Path search node cap.
pub const GPS_MAX_NODES: usize = 2000;

/// Segments shorter than this are ignored when clipping the route start.
pub const GPS_MIN_SEGMENT: f32 = 0.01;

/// Player within this distance of a segment start snaps the route to the player.
pub const GPS_SNAP_DISTANCE: f32 = 50.0;

/// Scissor inset inside the render target.
pub const GPS_SCISSOR_INSET: f32 = 2.0;

// --- Overlays ---

/// Duration of the fade shown after leaving an interior.
pub const INTERIOR_FADE_MS: u64 = 10_000;

/// Altitude gain that fills the altitude strip.
pub const ALTITUDE_STRIP_MAX: f32 = 250.0;

/// Altitude strip width at the reference resolution.
pub const ALTITUDE_STRIP_WIDTH: f32 = 20.0;

/// Radio text box size.
pub const RADIO_BOX_WIDTH: f32 = 250.0;

/// Radio text box size.
pub const RADIO_BOX_HEIGHT: f32 = 80.0;

/// Gap between the radio box and the radar top.
pub const RADIO_BOX_GAP: f32 = 10.0;

/// Radio text font size.
pub const RADIO_FONT_SIZE: f32 = 66.0;

/// Highest station id with a name.
pub const RADIO_MAX_STATION: i32 = 12;

// --- Airstrips ---

/// Step used for the screen-space derivative along a runway.
pub const AIRSTRIP_DERIVATIVE_STEP: f32 = 100.0;

/// Share of the in-radar runway interval used by the approach light animation.
pub const AIRSTRIP_ANIM_SHARE: f32 = 0.75;

/// Period of the approach light animation.
pub const AIRSTRIP_ANIM_CYCLE_MS: f32 = 350.0;

/// Runway half-width as a fraction of the strip radius.
pub const AIRSTRIP_WIDTH_FACTOR: f32 = 0.25;

/// Smallest inner radius used for off-frustum approach lights.
pub const AIRSTRIP_MIN_INNER_RADIUS: f32 = 10.0;
