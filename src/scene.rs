use glam::{
    const_vec3,
    Mat4,
    Vec3,
};

use crate::config::Config;
use crate::error::Result;
use crate::object::{
    LoadedMesh,
    Mesh,
};
use crate::program::LoadedProg;
use crate::texture::load_image_or_checkerboard;
use crate::GraphicsContext;

pub const CUBE_POSITIONS : [Vec3; 10] = [
    const_vec3!([ 0.0, 0.0, 0.0 ]),
    const_vec3!([ 2.0, 5.0, -15.0 ]),
    const_vec3!([ -1.5, -2.2, -2.5 ]),
    const_vec3!([ -3.8, -2.0, -12.3 ]),
    const_vec3!([ 2.4, -0.4, -3.5 ]),
    const_vec3!([ -1.7, 3.0, -7.5 ]),
    const_vec3!([ 1.3, -2.0, -2.5 ]),
    const_vec3!([ 1.5, 2.0, -2.5 ]),
    const_vec3!([ 1.5, 0.2, -1.5 ]),
    const_vec3!([ -1.3, 1.0, -1.5 ]),
];

/// Places cube `i`: translated to its position, then turned `20 * i`
/// degrees about a fixed tilted axis.
pub fn model_matrix(i : usize) -> Mat4 {
    let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
    let angle = (20.0 * i as f32).to_radians();

    Mat4::from_translation(CUBE_POSITIONS[i % CUBE_POSITIONS.len()])
        * Mat4::from_axis_angle(axis, angle)
}

/// The textured cube field shared by the `cubes` and camera programs.
pub struct TexturedCubes {
    prog : LoadedProg,
    cube : LoadedMesh,
    textures : [glow::NativeTexture; 2],
}

impl TexturedCubes {
    pub fn new(ctx : &GraphicsContext, config : &Config) -> Result<Self> {
        let prog = ctx.load_program(
            include_str!("shaders/cube.vert"),
            include_str!("shaders/cube.frag"),
        )?;

        let cube = ctx.load_mesh(&Mesh::textured_cube())?;

        let [first, second] = &config.assets.textures;
        let textures = [
            ctx.texture_2d_image(&load_image_or_checkerboard(first))?,
            ctx.texture_2d_image(&load_image_or_checkerboard(second))?,
        ];

        // samplers only need their texture unit once
        let u = ctx.use_program(&prog);
        u.set_int("texture1", 0);
        u.set_int("texture2", 1);

        Ok(Self{ prog, cube, textures })
    }

    pub fn render(
        &self,
        ctx : &GraphicsContext,
        view : Mat4,
        projection : Mat4,
    ) {
        // the egui overlay turns depth testing off while it paints
        ctx.enable_depth_test();

        for (unit, tex) in self.textures.iter().enumerate() {
            ctx.bind_texture(unit as u32, *tex);
        }

        let u = ctx.use_program(&self.prog);
        u.set_mat4("view", view);
        u.set_mat4("projection", projection);

        for i in 0..CUBE_POSITIONS.len() {
            u.set_mat4("model", model_matrix(i));
            ctx.draw_mesh(&self.cube);
        }
    }

    pub fn destroy(self, ctx : &GraphicsContext) {
        for tex in self.textures {
            ctx.unload_texture(tex);
        }

        ctx.unload_mesh(self.cube);
        ctx.unload_program(&self.prog);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS : f32 = 1e-5;

    #[test]
    fn first_cube_is_at_origin_unrotated() {
        assert!(model_matrix(0).abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn cubes_are_centred_on_their_positions() {
        for (i, pos) in CUBE_POSITIONS.iter().enumerate() {
            let centre = model_matrix(i).transform_point3(Vec3::ZERO);
            assert!(centre.abs_diff_eq(*pos, EPS));
        }
    }

    #[test]
    fn rotation_keeps_the_axis() {
        let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
        let m = model_matrix(3);

        assert!(m.transform_vector3(axis).abs_diff_eq(axis, EPS));
    }
}
