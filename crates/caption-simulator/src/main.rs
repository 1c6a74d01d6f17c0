//! Desktop simulator for the caption-view captioned image widget.
//!
//! Renders two captioned images side by side in an SDL2 window via
//! `embedded-graphics-simulator`: the left one stretches its image, the right
//! one centers it. Images are generated procedurally so no assets are needed.
//! Only the dirty region of a changed widget is cleared and repainted.
//!
//! # Key bindings
//!
//! | Key   | Action                                  |
//! |-------|-----------------------------------------|
//! | C     | Cycle captions (short, long, none)      |
//! | Up    | Larger caption font                     |
//! | Down  | Smaller caption font                    |
//! | S     | Swap scale modes                        |
//! | L     | Toggle legacy center clamp              |
//! | P     | Toggle uniform / symmetric padding      |
//! | Q     | Quit                                    |

use std::time::{Duration, Instant};

use caption_view::ui::Padding;
use caption_view::{
    Attributes, Bitmap, CaptionedImage, CenterClamp, Constraint, Dimension, DisplayMetrics,
    Drawable, ResourceError, ResourceId, ResourceProvider, ScaleMode,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use embedded_layout::align::{Align, horizontal, vertical};
use log::{error, info};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Gap around and between the two widgets.
const MARGIN: u32 = 8;

/// Padding shown by the P key, alternating with the uniform one
const SYMMETRIC_PADDING: (u32, u32) = (12, 3);

const GRADIENT_IMAGE: ResourceId = ResourceId(1);
const CHECKER_IMAGE: ResourceId = ResourceId(2);

const CAPTIONS: [Option<&str>; 3] = [
    Some("Sunrise"),
    Some("A caption far too long to fit on a single line of this widget"),
    None,
];

// ---------------------------------------------------------------------------
// Generated images
// ---------------------------------------------------------------------------

/// Resource provider that renders its images on demand.
struct GeneratedImages;

impl GeneratedImages {
    fn gradient(width: u32, height: u32) -> Vec<Rgb565> {
        (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    let r = (x * 31 / width.max(1)) as u8;
                    let g = (y * 63 / height.max(1)) as u8;
                    Rgb565::new(r, g, 31 - r)
                })
            })
            .collect()
    }

    fn checker(width: u32, height: u32, cell: u32) -> Vec<Rgb565> {
        (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    if (x / cell + y / cell) % 2 == 0 {
                        Rgb565::YELLOW
                    } else {
                        Rgb565::MAGENTA
                    }
                })
            })
            .collect()
    }
}

impl ResourceProvider for GeneratedImages {
    fn load_bitmap(&self, id: ResourceId) -> Result<Bitmap, ResourceError> {
        let bitmap = match id {
            GRADIENT_IMAGE => Bitmap::from_pixels(64, Self::gradient(64, 48))?,
            CHECKER_IMAGE => Bitmap::from_pixels(48, Self::checker(48, 40, 8))?,
            other => return Err(ResourceError::NotFound(other.0)),
        };
        Ok(bitmap)
    }
}

// ---------------------------------------------------------------------------
// Widget helpers
// ---------------------------------------------------------------------------

fn build_widget(
    image: ResourceId,
    scale_type: i32,
    caption: Option<&str>,
    metrics: &DisplayMetrics,
) -> Option<CaptionedImage> {
    let attrs = Attributes {
        title_text: caption,
        title_text_color: Some(0xFFFF_FFFF),
        title_text_size: Some(Dimension::Sp(16.0)),
        image: Some(image),
        image_scale_type: Some(scale_type),
        padding: Some([Dimension::Dp(6.0); 4]),
        legacy_center_clamp: None,
    };

    match CaptionedImage::configure(&attrs, metrics, &GeneratedImages) {
        Ok(widget) => Some(widget),
        Err(e) => {
            error!("Widget configuration failed: {}", e);
            None
        }
    }
}

/// Measure each widget into its half of the screen and place it there.
fn lay_out(widgets: &mut [CaptionedImage]) {
    let slot_width = (DISPLAY_WIDTH_PX - 3 * MARGIN) / 2;
    let slot_height = DISPLAY_HEIGHT_PX - 2 * MARGIN;

    for (i, widget) in widgets.iter_mut().enumerate() {
        widget.measure(
            Constraint::AtMost(slot_width),
            Constraint::AtMost(slot_height),
        );

        let slot = Rectangle::new(
            Point::new((MARGIN + i as u32 * (slot_width + MARGIN)) as i32, MARGIN as i32),
            Size::new(slot_width, slot_height),
        );
        let placed = widget
            .clone()
            .with_origin(Point::zero())
            .align_to(&slot, horizontal::Center, vertical::Center);
        *widget = placed;
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting caption-view simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!(
        "Keys: C=Caption  Up/Down=Font size  S=Swap modes  L=Legacy clamp  P=Padding  Q=Quit"
    );

    let metrics = DisplayMetrics::default();
    let mut caption_index = 0;
    let mut symmetric_padding = false;

    let Some(left) = build_widget(GRADIENT_IMAGE, 0, CAPTIONS[0], &metrics) else {
        return;
    };
    let Some(right) = build_widget(CHECKER_IMAGE, 1, CAPTIONS[0], &metrics) else {
        return;
    };
    let mut widgets = [left, right];
    lay_out(&mut widgets);

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Caption View Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    for widget in &mut widgets {
        let _ = widget.draw(&mut display);
        widget.mark_clean();
    }
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::C => {
                        caption_index = (caption_index + 1) % CAPTIONS.len();
                        info!("Caption → {:?}", CAPTIONS[caption_index]);
                        for widget in &mut widgets {
                            if let Err(e) = widget.set_caption(CAPTIONS[caption_index]) {
                                error!("Caption rejected: {}", e);
                            }
                        }
                    }
                    Keycode::Up | Keycode::Down => {
                        for widget in &mut widgets {
                            let px = widget.config().font_size_px;
                            let px = if keycode == Keycode::Up {
                                px + 2
                            } else {
                                px.saturating_sub(2)
                            };
                            widget.set_font_size(px);
                        }
                        info!("Font size → {}px", widgets[0].config().font_size_px);
                    }
                    Keycode::S => {
                        for widget in &mut widgets {
                            let mode = match widget.config().scale_mode {
                                ScaleMode::FillXY => ScaleMode::Center,
                                ScaleMode::Center => ScaleMode::FillXY,
                            };
                            widget.set_scale_mode(mode);
                        }
                        info!("Scale modes swapped");
                    }
                    Keycode::L => {
                        for widget in &mut widgets {
                            let clamp = match widget.config().center_clamp {
                                CenterClamp::ImageHeight => CenterClamp::LegacyImageWidth,
                                CenterClamp::LegacyImageWidth => CenterClamp::ImageHeight,
                            };
                            widget.set_center_clamp(clamp);
                        }
                        info!("Center clamp → {:?}", widgets[0].config().center_clamp);
                    }
                    Keycode::P => {
                        symmetric_padding = !symmetric_padding;
                        let padding = if symmetric_padding {
                            let (vertical, horizontal) = SYMMETRIC_PADDING;
                            Padding::symmetric(vertical, horizontal)
                        } else {
                            Padding::all(Dimension::Dp(6.0).to_px(&metrics))
                        };
                        for widget in &mut widgets {
                            widget.set_padding(padding);
                        }
                        info!("Padding → {:?}", padding);
                    }
                    _ => {}
                },

                _ => {}
            }
        }

        // --- Layout -------------------------------------------------------
        if widgets.iter().any(CaptionedImage::is_layout_requested) {
            lay_out(&mut widgets);
        }

        // --- Render -------------------------------------------------------
        let screen = display.bounding_box();
        for widget in &mut widgets {
            let Some(region) = widget.dirty_region() else {
                continue;
            };
            let _ = display.fill_solid(&region.bounds.intersection(&screen), Rgb565::BLACK);
            if let Err(e) = widget.draw(&mut display) {
                error!("Draw error: {:?}", e);
            }
            widget.mark_clean();
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
