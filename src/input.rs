//! Translation of raw window events into the signals the scene understands.
//!
//! The scene works in logical pixels, the unit its densities and distances
//! are tuned for. winit reports physical pixels, so positions and sizes are
//! divided by the window's scale factor here. The physical size is kept too,
//! since the GPU surface is configured in it.

use glam::Vec2;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Pointer moved to this position, in logical pixels.
    PointerMoved(Vec2),
    /// Pointer left the window.
    PointerLeft,
    /// Window resized.
    Resized {
        physical: PhysicalSize<u32>,
        logical: Vec2,
    },
    /// Display scale factor changed. A `Resized` follows with the new sizes.
    Rescaled(f64),
    /// Close button or Escape.
    Quit,
}

/// Map a window event to a [`Signal`], if it is one we react to.
pub fn translate(event: &WindowEvent, scale_factor: f64) -> Option<Signal> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f32>(scale_factor);
            Some(Signal::PointerMoved(Vec2::new(logical.x, logical.y)))
        }
        WindowEvent::CursorLeft { .. } => Some(Signal::PointerLeft),
        WindowEvent::Resized(size) => Some(Signal::Resized {
            physical: *size,
            logical: logical_size(*size, scale_factor),
        }),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => Some(Signal::Rescaled(*scale_factor)),
        WindowEvent::CloseRequested => Some(Signal::Quit),
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed
                && event.logical_key == Key::Named(NamedKey::Escape) =>
        {
            Some(Signal::Quit)
        }
        _ => None,
    }
}

/// Size of a physical extent in logical pixels.
pub fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> Vec2 {
    let logical = size.to_logical::<f32>(scale_factor);
    Vec2::new(logical.width, logical.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn moved_to(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn test_cursor_moved() {
        assert_eq!(
            translate(&moved_to(12.5, 40.0), 1.0),
            Some(Signal::PointerMoved(Vec2::new(12.5, 40.0)))
        );
    }

    #[test]
    fn test_cursor_moved_on_hidpi_is_logical() {
        assert_eq!(
            translate(&moved_to(800.0, 600.0), 2.0),
            Some(Signal::PointerMoved(Vec2::new(400.0, 300.0)))
        );
    }

    #[test]
    fn test_cursor_left() {
        let event = WindowEvent::CursorLeft {
            device_id: DeviceId::dummy(),
        };
        assert_eq!(translate(&event, 1.0), Some(Signal::PointerLeft));
    }

    #[test]
    fn test_resized_and_close() {
        assert_eq!(
            translate(&WindowEvent::Resized(PhysicalSize::new(1024, 768)), 1.0),
            Some(Signal::Resized {
                physical: PhysicalSize::new(1024, 768),
                logical: Vec2::new(1024.0, 768.0),
            })
        );
        assert_eq!(translate(&WindowEvent::CloseRequested, 1.0), Some(Signal::Quit));
        assert_eq!(translate(&WindowEvent::Focused(true), 1.0), None);
    }

    #[test]
    fn test_resized_on_hidpi_keeps_both_sizes() {
        assert_eq!(
            translate(&WindowEvent::Resized(PhysicalSize::new(1600, 1200)), 2.0),
            Some(Signal::Resized {
                physical: PhysicalSize::new(1600, 1200),
                logical: Vec2::new(800.0, 600.0),
            })
        );
    }

    #[test]
    fn test_hidpi_surface_seeds_like_logical_surface() {
        use crate::config::ParticleConfig;
        use crate::field::particle_count;

        let cfg = ParticleConfig::default();
        let logical = logical_size(PhysicalSize::new(1600, 1200), 2.0);
        assert_eq!(particle_count(logical.x, logical.y, &cfg), 53);
    }
}
