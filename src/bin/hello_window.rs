use opengl_by_example::*;

use config::Config;
use error::Result;
use input::handle_common_keys;

use winit_input_helper::WinitInputHelper;

struct HelloWindow {
    clear_color : [f32; 4],
    input : WinitInputHelper,
}

impl App for HelloWindow {
    fn init(ctx : &mut GraphicsContext, config : &Config) -> Result<Self> {
        ctx.set_title(&format!("{} - hello window", config.window.title));

        Ok(Self{
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
        }

        if is_redraw_event(event) {
            ctx.clear(self.clear_color);
            ctx.swap_buffers();
        }

        if quit {
            *control_flow = glutin::event_loop::ControlFlow::Exit;
        }
    }
}

fn main() {
    launch::<HelloWindow>();
}
