use t2i::colours;
use t2i::layout;
use t2i::{Colour, Font, RenderConfig};

fn main() {
    // the bundled monospace font; any TTF or OTF loaded with Font::load works too
    let font = Font::default_mono().expect("can load font");

    // fit the image to the text, square it off, and use light-on-dark colours
    let config = RenderConfig::default()
        .with_auto_size(true)
        .with_square(true)
        .with_font(16.0, 120.0)
        .with_colours(
            Some(colours::WHITE),
            Some(Colour::from_hex("#1e1e2e").expect("valid colour")),
        );

    // tabs are not expanded by the renderer itself
    let text = layout::expand_tabs("fn main() {\n\tprintln!(\"Hello world!\");\n}\n", 4);

    let image = t2i::render(text.as_bytes(), &config, &font).expect("can render text");
    t2i::save_png(&image, "hello-world.png").expect("can write png");
}
