//! Paints a [`Frame`] onto an SDL2 canvas with the `gfx` primitives.

use glam::Vec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::error::{GameError, GameResult};
use crate::map::direction::Direction;
use crate::render::frame::{DrawCommand, Frame, Rgb, PACMAN};

const EYE_WHITE: Rgb = Rgb(255, 255, 255);
const PUPIL: Rgb = Rgb(33, 33, 222);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::RGB(rgb.0, rgb.1, rgb.2)
    }
}

/// Draws every command in order, then presents the canvas.
pub fn present(canvas: &mut Canvas<Window>, frame: &Frame) -> GameResult<()> {
    for command in &frame.commands {
        draw(canvas, command).map_err(GameError::Sdl)?;
    }
    canvas.present();
    Ok(())
}

fn draw(canvas: &mut Canvas<Window>, command: &DrawCommand) -> Result<(), String> {
    match command {
        DrawCommand::Clear(color) => {
            canvas.set_draw_color(Color::from(*color));
            canvas.clear();
            Ok(())
        }
        DrawCommand::Rect { origin, size, color } => {
            let end = *origin + *size - Vec2::ONE;
            canvas.box_(px(origin.x), px(origin.y), px(end.x), px(end.y), Color::from(*color))
        }
        DrawCommand::Circle { center, radius, color } => {
            canvas.filled_circle(px(center.x), px(center.y), px(*radius), Color::from(*color))
        }
        DrawCommand::Pacman {
            center,
            radius,
            facing,
            mouth,
        } => draw_pacman(canvas, *center, *radius, *facing, *mouth),
        DrawCommand::Ghost {
            center,
            radius,
            body,
            pupils,
        } => draw_ghost(canvas, *center, *radius, *body, *pupils),
        DrawCommand::Text { origin, text, color } => canvas.string(px(origin.x), px(origin.y), text, Color::from(*color)),
    }
}

fn draw_pacman(canvas: &mut Canvas<Window>, center: Vec2, radius: f32, facing: Direction, mouth: f32) -> Result<(), String> {
    // Half of the wedge, up to 45 degrees either side of the heading
    let half = (mouth.clamp(0.0, 1.0) * 45.0) as i16;
    if half == 0 {
        return canvas.filled_circle(px(center.x), px(center.y), px(radius), Color::from(PACMAN));
    }

    let heading = facing.angle_degrees();
    canvas.filled_pie(
        px(center.x),
        px(center.y),
        px(radius),
        heading + half,
        heading + 360 - half,
        Color::from(PACMAN),
    )
}

fn draw_ghost(canvas: &mut Canvas<Window>, center: Vec2, radius: f32, body: Rgb, pupils: Option<Direction>) -> Result<(), String> {
    let (x, y, r) = (px(center.x), px(center.y), px(radius));
    canvas.filled_circle(x, y - r / 4, r, Color::from(body))?;
    canvas.box_(x - r, y - r / 4, x + r, y + r, Color::from(body))?;

    let eye_radius = (r / 3).max(2);
    for side in [-1i16, 1] {
        let eye = (x + side * r * 2 / 5, y - r / 4);
        match pupils {
            Some(direction) => {
                let offset = direction.as_ivec2() * (eye_radius / 2) as i32;
                canvas.filled_circle(eye.0, eye.1, eye_radius, Color::from(EYE_WHITE))?;
                canvas.filled_circle(
                    eye.0 + offset.x as i16,
                    eye.1 + offset.y as i16,
                    (eye_radius / 2).max(1),
                    Color::from(PUPIL),
                )?;
            }
            // Frightened: small pale eyes and nothing else
            None => canvas.filled_circle(eye.0, eye.1, (eye_radius / 2).max(1), Color::from(EYE_WHITE))?,
        }
    }

    Ok(())
}

fn px(value: f32) -> i16 {
    value.round() as i16
}
