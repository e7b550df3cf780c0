use crate::config::WindowConfig;
use crate::error::{
    Error,
    Result,
};

pub type GlutinContext = glutin::WindowedContext<glutin::PossiblyCurrent>;

/// Opens a window with an OpenGL 3.3 core context and loads the GL function
/// pointers through it.
pub fn create_display(
    event_loop : &glutin::event_loop::EventLoop<()>,
    config : &WindowConfig,
) -> Result<(GlutinContext, glow::Context)> {
    let window_builder = glutin::window::WindowBuilder::new()
        .with_title(&config.title)
        .with_resizable(true)
        .with_inner_size(glutin::dpi::LogicalSize {
            width: config.width as f64,
            height: config.height as f64,
        });

    let gl_window = glutin::ContextBuilder::new()
        .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
        .with_gl_profile(glutin::GlProfile::Core)
        .with_depth_buffer(24)
        .with_stencil_buffer(0)
        .with_vsync(config.vsync)
        .build_windowed(window_builder, event_loop)
        .map_err(|e| Error::Context(e.to_string()))?;

    let gl_window = unsafe {
        gl_window
            .make_current()
            .map_err(|(_, e)| Error::Context(e.to_string()))?
    };

    let gl = unsafe {
        glow::Context::from_loader_function(|s| {
            gl_window.get_proc_address(s)
        })
    };

    Ok((gl_window, gl))
}

/// Runs `f` when dropped unless `disarm` was called first. GL objects that
/// are created one after another hold one of these each, so that an early
/// `?` deletes everything made so far.
pub(crate) struct Rollback<F : FnOnce()> {
    f : Option<F>,
}

impl<F : FnOnce()> Rollback<F> {
    pub(crate) fn new(f : F) -> Self {
        Self{ f : Some(f) }
    }

    pub(crate) fn disarm(mut self) {
        self.f = None;
    }
}

impl<F : FnOnce()> Drop for Rollback<F> {
    fn drop(&mut self) {
        if let Some(f) = self.f.take() {
            f();
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn rollback_runs_on_early_return() {
        let deleted = Cell::new(0);

        let build = |fail_at : u32| -> Result<()> {
            let first = Rollback::new(|| deleted.set(deleted.get() + 1));
            if fail_at == 1 {
                return Err(Error::Gl("second object".into()));
            }

            let second = Rollback::new(|| deleted.set(deleted.get() + 1));
            if fail_at == 2 {
                return Err(Error::Gl("check".into()));
            }

            first.disarm();
            second.disarm();
            Ok(())
        };

        assert!(build(1).is_err());
        assert_eq!(deleted.get(), 1);

        deleted.set(0);
        assert!(build(2).is_err());
        assert_eq!(deleted.get(), 2);

        deleted.set(0);
        assert!(build(0).is_ok());
        assert_eq!(deleted.get(), 0);
    }

    #[test]
    fn rollback_runs_once() {
        let runs = Cell::new(0);

        drop(Rollback::new(|| runs.set(runs.get() + 1)));

        assert_eq!(runs.get(), 1);
    }
}
