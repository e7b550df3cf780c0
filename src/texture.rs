use std::path::Path;

use image::GenericImageView;

use crate::error::{
    Error,
    Result,
};

/// Decodes an image from disk into RGBA8, flipped so the first row is the
/// bottom one, which is where OpenGL expects texture coordinate `v = 0`.
pub fn load_image(path : &Path) -> Result<image::RgbaImage> {
    let img = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(source) => Error::Io {
            path : path.to_owned(),
            source,
        },
        source => Error::Image {
            path : path.to_owned(),
            source,
        },
    })?;

    log::info!(
        "{} loaded ({}x{})",
        path.display(),
        img.width(),
        img.height(),
    );

    Ok(image::imageops::flip_vertical(&img.to_rgba8()))
}

/// Like `load_image`, but falls back to a checkerboard when the file is
/// missing or broken so the demos still have something to sample.
pub fn load_image_or_checkerboard(path : &Path) -> image::RgbaImage {
    match load_image(path) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("{}, using a checkerboard instead", e);
            checkerboard(256, 32)
        }
    }
}

pub fn checkerboard(size : u32, cell : u32) -> image::RgbaImage {
    let cell = cell.max(1);

    image::RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            image::Rgba([200, 140, 60, 255])
        } else {
            image::Rgba([60, 40, 20, 255])
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn checkerboard_cells() {
        let img = checkerboard(64, 16);

        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(img.get_pixel(0, 0), img.get_pixel(15, 15));
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(16, 0));
        assert_eq!(img.get_pixel(0, 0), img.get_pixel(16, 16));
    }

    #[test]
    fn zero_cell_does_not_divide_by_zero() {
        let img = checkerboard(4, 0);

        assert_ne!(img.get_pixel(0, 0), img.get_pixel(1, 0));
    }

    #[test]
    fn loaded_images_are_flipped() {
        let path = std::env::temp_dir().join(format!(
            "opengl-by-example-flip-{}.png",
            std::process::id(),
        ));

        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.get_pixel(0, 1), &image::Rgba([255, 0, 0, 255]));
        assert_eq!(loaded.get_pixel(0, 0), &image::Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn missing_file_falls_back() {
        let path = Path::new("no/such/texture.png");

        assert!(matches!(load_image(path), Err(Error::Io{ .. })));
        assert_eq!(load_image_or_checkerboard(path).dimensions(), (256, 256));
    }
}
