use opengl_by_example::*;

use config::Config;
use error::Result;
use input::handle_common_keys;
use object::{
    LoadedMesh,
    Mesh,
};
use program::LoadedProg;
use texture::load_image_or_checkerboard;

use glutin::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

struct Textures {
    prog : LoadedProg,
    quad : LoadedMesh,
    textures : [glow::NativeTexture; 2],
    mix_value : f32,
    clear_color : [f32; 4],
    input : WinitInputHelper,
}

impl App for Textures {
    fn init(ctx : &mut GraphicsContext, config : &Config) -> Result<Self> {
        ctx.set_title(&format!("{} - textures", config.window.title));

        let prog = ctx.load_program(
            include_str!("../shaders/texture.vert"),
            include_str!("../shaders/texture.frag"),
        )?;

        let [first, second] = &config.assets.textures;
        let textures = [
            ctx.texture_2d_image(&load_image_or_checkerboard(first))?,
            ctx.texture_2d_image(&load_image_or_checkerboard(second))?,
        ];

        let u = ctx.use_program(&prog);
        u.set_int("texture1", 0);
        u.set_int("texture2", 1);

        Ok(Self{
            prog,
            quad : ctx.load_mesh(&Mesh::textured_quad())?,
            textures,
            mix_value : 0.2,
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

            const STEP : f32 = 0.05;

            if self.input.key_pressed(VirtualKeyCode::Up) {
                self.mix_value = (self.mix_value + STEP).min(1.0);
            }

            if self.input.key_pressed(VirtualKeyCode::Down) {
                self.mix_value = (self.mix_value - STEP).max(0.0);
            }
        }

        if is_redraw_event(event) {
            ctx.clear(self.clear_color);

            for (unit, tex) in self.textures.iter().enumerate() {
                ctx.bind_texture(unit as u32, *tex);
            }

            let u = ctx.use_program(&self.prog);
            u.set_float("mixValue", self.mix_value);

            ctx.draw_mesh(&self.quad);

            ctx.swap_buffers();
        }

        if quit {
            *control_flow = glutin::event_loop::ControlFlow::Exit;
        }
    }

    fn destroy(&mut self, ctx : &mut GraphicsContext) {
        ctx.unload_program(&self.prog);
        for tex in self.textures {
            ctx.unload_texture(tex);
        }

        ctx.unload_mesh(self.quad);
    }
}

fn main() {
    launch::<Textures>();
}
