use opengl_by_example::*;

use config::Config;
use error::Result;
use input::handle_common_keys;
use object::{
    LoadedMesh,
    Mesh,
};
use program::LoadedProg;

use std::path::Path;
use std::time::Instant;

use glutin::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

struct Triangle {
    prog : LoadedProg,
    triangle : LoadedMesh,
    quad : LoadedMesh,
    show_quad : bool,
    grayscale : bool,
    clear_color : [f32; 4],
    start : Instant,
    input : WinitInputHelper,
}

impl App for Triangle {
    fn init(ctx : &mut GraphicsContext, config : &Config) -> Result<Self> {
        ctx.set_title(&format!("{} - triangle", config.window.title));

        // read at startup so the shaders can be edited without a rebuild
        let shaders = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/shaders");
        let prog = ctx.load_program_files(
            &shaders.join("triangle.vert"),
            &shaders.join("triangle.frag"),
        )?;

        Ok(Self{
            prog,
            triangle : ctx.load_mesh(&Mesh::triangle())?,
            quad : ctx.load_mesh(&Mesh::quad())?,
            show_quad : false,
            grayscale : false,
            clear_color : config.clear_color,
            start : Instant::now(),
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

            // Q swaps between the plain triangle and the indexed quad
            if self.input.key_pressed(VirtualKeyCode::Q) {
                self.show_quad = !self.show_quad;
            }

            if self.input.key_pressed(VirtualKeyCode::G) {
                self.grayscale = !self.grayscale;
            }
        }

        if is_redraw_event(event) {
            ctx.clear(self.clear_color);

            let t = self.start.elapsed().as_secs_f32();

            let u = ctx.use_program(&self.prog);
            u.set_float("brightness", 0.5 + 0.5 * t.sin().abs());
            u.set_vec3(
                "tint",
                glam::Vec3::new(1.0, 0.5 + 0.5 * t.cos().abs(), 1.0),
            );
            u.set_bool("grayscale", self.grayscale);

            ctx.draw_mesh(if self.show_quad {
                &self.quad
            } else {
                &self.triangle
            });

            ctx.swap_buffers();
        }

        if quit {
            *control_flow = glutin::event_loop::ControlFlow::Exit;
        }
    }

    fn destroy(&mut self, ctx : &mut GraphicsContext) {
        ctx.unload_program(&self.prog);
        ctx.unload_mesh(self.triangle);
        ctx.unload_mesh(self.quad);
    }
}

fn main() {
    launch::<Triangle>();
}
