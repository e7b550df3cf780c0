use opengl_by_example::*;

use camera::Projection;
use config::Config;
use error::Result;
use input::handle_common_keys;
use scene::TexturedCubes;

use glam::{
    Mat4,
    Vec3,
};
use winit_input_helper::WinitInputHelper;

struct Cubes {
    // taken on teardown
    cubes : Option<TexturedCubes>,
    projection : Projection,
    clear_color : [f32; 4],
    input : WinitInputHelper,
}

impl App for Cubes {
    fn init(ctx : &mut GraphicsContext, config : &Config) -> Result<Self> {
        ctx.set_title(&format!("{} - coordinate systems", config.window.title));

        Ok(Self{
            cubes : Some(TexturedCubes::new(ctx, config)?),
            projection : Projection {
                aspect : ctx.aspect(),
                ..Projection::default()
            },
            clear_color : config.clear_color,
            input : WinitInputHelper::new(),
        })
    }

    fn update(
        &mut self,
        event : &glutin::event::Event<'_, ()>,
        ctx : &mut GraphicsContext,
        control_flow : &mut glutin::event_loop::ControlFlow,
    ) {
        let mut quit = false;

        if self.input.update(event) {
            quit = handle_common_keys(&self.input, ctx);

            if self.input.window_resized().is_some() {
                self.projection.aspect = ctx.aspect();
            }
        }

        if is_redraw_event(event) {
            ctx.clear(self.clear_color);

            // pull the scene back so the first cube is in view
            let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));

            if let Some(cubes) = &self.cubes {
                cubes.render(ctx, view, self.projection.matrix(45.0));
            }

            ctx.swap_buffers();
        }

        if quit {
            *control_flow = glutin::event_loop::ControlFlow::Exit;
        }
    }

    fn destroy(&mut self, ctx : &mut GraphicsContext) {
        if let Some(cubes) = self.cubes.take() {
            cubes.destroy(ctx);
        }
    }
}

fn main() {
    launch::<Cubes>();
}
