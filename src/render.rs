use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
};
use heapless::{String, Vec};
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use crate::{session::SessionView, tap_engine::TAP_HISTORY_CAPACITY};

const LABEL_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvR08_tf>();

const TEXT_FRAME_ORIGIN: Point = Point::new(23, 30);
const TEXT_FRAME_SIZE: Size = Size::new(94, 29);
const TEXT_PADDING_X: i32 = 3;
const STRENGTH_ROW_Y: i32 = 38;
const TIME_ROW_Y: i32 = 51;
const CROSSHAIR_ARM_PX: i32 = 10;

/// What one redraw put on screen.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SceneReport {
    pub circles_drawn: u8,
    /// `(slot, radius)` for history slots skipped as implausibly large.
    pub rejected: Vec<(usize, i16), TAP_HISTORY_CAPACITY>,
}

/// Draws the whole tap scene bottom-up: last-tap box, cursor crosshair, history
/// circles. The box is opaque, so everything after it stays visible on top.
pub fn draw_scene<D>(display: &mut D, view: &SessionView, max_radius: i16) -> SceneReport
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = display.clear(BinaryColor::Off);
    draw_last_tap_box(display, view);
    draw_crosshair(display, i32::from(view.cursor.x), i32::from(view.cursor.y));

    let mut report = SceneReport::default();
    for (slot, circle) in view.circles.iter().enumerate() {
        if circle.radius == 0 {
            continue;
        }
        if !circle.is_drawable(max_radius) {
            let _ = report.rejected.push((slot, circle.radius));
            continue;
        }
        draw_tap_circle(display, i32::from(circle.x), i32::from(circle.y), circle.radius);
        report.circles_drawn += 1;
    }
    report
}

fn draw_tap_circle<D>(display: &mut D, x: i32, y: i32, radius: i16)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let diameter = (u32::from(radius.unsigned_abs()) * 2) + 1;
    let _ = Circle::with_center(Point::new(x, y), diameter)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
}

fn draw_crosshair<D>(display: &mut D, x: i32, y: i32)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let _ = Line::new(
        Point::new(x - CROSSHAIR_ARM_PX, y),
        Point::new(x + CROSSHAIR_ARM_PX, y),
    )
    .into_styled(style)
    .draw(display);
    let _ = Line::new(
        Point::new(x, y - CROSSHAIR_ARM_PX),
        Point::new(x, y + CROSSHAIR_ARM_PX),
    )
    .into_styled(style)
    .draw(display);
}

fn draw_last_tap_box<D>(display: &mut D, view: &SessionView)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let frame = PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::On)
        .stroke_width(1)
        .fill_color(BinaryColor::Off)
        .build();
    let _ = Rectangle::new(TEXT_FRAME_ORIGIN, TEXT_FRAME_SIZE)
        .into_styled(frame)
        .draw(display);

    let mut strength: String<8> = String::new();
    let mut time: String<16> = String::new();
    match view.last_tap {
        Some(tap) => {
            let _ = write!(strength, "{}", tap.strength);
            // Shown as a 31-bit millisecond stamp.
            let _ = write!(time, "{}", tap.timestamp_ms & 0x7FFF_FFFF);
        }
        None => {
            let _ = strength.push('-');
            let _ = time.push('-');
        }
    }

    draw_row(display, "Strength:", &strength, STRENGTH_ROW_Y);
    draw_row(display, "Time:", &time, TIME_ROW_Y);
}

fn draw_row<D>(display: &mut D, label: &str, value: &str, center_y: i32)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let left = TEXT_FRAME_ORIGIN.x + TEXT_PADDING_X;
    let right = TEXT_FRAME_ORIGIN.x + TEXT_FRAME_SIZE.width as i32 - 1 - TEXT_PADDING_X;
    let _ = LABEL_FONT.render_aligned(
        label,
        Point::new(left, center_y),
        VerticalPosition::Center,
        HorizontalAlignment::Left,
        FontColor::Transparent(BinaryColor::On),
        display,
    );
    let _ = LABEL_FONT.render_aligned(
        value,
        Point::new(right, center_y),
        VerticalPosition::Center,
        HorizontalAlignment::Right,
        FontColor::Transparent(BinaryColor::On),
        display,
    );
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::{
        history::TapCircle,
        tap_engine::{CursorPosition, Tap},
    };

    const WIDTH: usize = 144;
    const HEIGHT: usize = 168;

    struct FrameBuffer {
        pixels: std::vec::Vec<bool>,
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: vec![true; WIDTH * HEIGHT],
            }
        }

        fn is_on(&self, x: i32, y: i32) -> bool {
            self.pixels[y as usize * WIDTH + x as usize]
        }

        fn lit_count(&self) -> usize {
            self.pixels.iter().filter(|on| **on).count()
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                    self.pixels[point.y as usize * WIDTH + point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    fn view(cursor: CursorPosition) -> SessionView {
        SessionView {
            cursor,
            last_tap: None,
            circles: [TapCircle::EMPTY; TAP_HISTORY_CAPACITY],
        }
    }

    #[test]
    fn empty_scene_draws_crosshair_and_frame() {
        let mut display = FrameBuffer::new();
        let report = draw_scene(&mut display, &view(CursorPosition::new(72, 120)), 100);

        assert_eq!(report, SceneReport::default());
        assert!(display.is_on(62, 120));
        assert!(display.is_on(82, 120));
        assert!(display.is_on(72, 110));
        assert!(display.is_on(72, 130));
        assert!(!display.is_on(61, 120));
        assert!(!display.is_on(72, 131));
        assert!(display.is_on(23, 30));
        assert!(display.is_on(116, 58));
        assert!(!display.is_on(0, 0));
    }

    #[test]
    fn crosshair_and_circle_stay_visible_over_text_box() {
        let mut display = FrameBuffer::new();
        let mut scene = view(CursorPosition::new(72, 44));
        scene.circles[0] = TapCircle {
            x: 72,
            y: 44,
            radius: 5,
        };
        let report = draw_scene(&mut display, &scene, 100);

        assert_eq!(report.circles_drawn, 1);
        let lit_on_row = (62..=82).filter(|x| display.is_on(*x, 44)).count();
        assert_eq!(lit_on_row, 21);
        assert!((34..=54).all(|y| display.is_on(72, y)));
        assert!(display.is_on(77, 44));
        assert!(display.is_on(23, 30));
    }

    #[test]
    fn history_circles_are_drawn_at_their_radius() {
        let mut display = FrameBuffer::new();
        let mut scene = view(CursorPosition::new(130, 10));
        scene.circles[0] = TapCircle {
            x: 40,
            y: 120,
            radius: 5,
        };
        let report = draw_scene(&mut display, &scene, 100);

        assert_eq!(report.circles_drawn, 1);
        assert!(display.is_on(45, 120));
        assert!(display.is_on(35, 120));
        assert!(display.is_on(40, 115));
        assert!(!display.is_on(40, 120));
        assert!(!display.is_on(47, 120));
    }

    #[test]
    fn oversize_radius_is_rejected_not_drawn() {
        let mut display = FrameBuffer::new();
        let scene = view(CursorPosition::new(130, 10));
        let baseline = {
            draw_scene(&mut display, &scene, 100);
            display.lit_count()
        };

        let mut oversize = scene;
        oversize.circles[3] = TapCircle {
            x: 70,
            y: 100,
            radius: 100,
        };
        let report = draw_scene(&mut display, &oversize, 100);

        assert_eq!(report.circles_drawn, 0);
        assert_eq!(report.rejected.as_slice(), &[(3, 100)]);
        assert_eq!(display.lit_count(), baseline);
    }

    #[test]
    fn last_tap_text_is_drawn_inside_frame() {
        let mut blank = FrameBuffer::new();
        draw_scene(&mut blank, &view(CursorPosition::new(130, 150)), 100);
        let mut tapped = FrameBuffer::new();
        let mut scene = view(CursorPosition::new(130, 150));
        scene.last_tap = Some(Tap {
            timestamp_ms: 0x1_0000_04D2,
            strength: 23,
            x: 0,
            y: 0,
        });
        draw_scene(&mut tapped, &scene, 100);

        let differs_inside_frame = (24..116)
            .flat_map(|x| (31..58).map(move |y| (x, y)))
            .any(|(x, y)| blank.is_on(x, y) != tapped.is_on(x, y));
        assert!(differs_inside_frame);
        let differs_outside_frame = (0..WIDTH as i32)
            .flat_map(|x| (60..HEIGHT as i32).map(move |y| (x, y)))
            .any(|(x, y)| blank.is_on(x, y) != tapped.is_on(x, y));
        assert!(!differs_outside_frame);
    }
}
