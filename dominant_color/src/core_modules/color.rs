// THEORY:
// The `Color` module is the most fundamental unit of the engine. It is a "dumb"
// value type holding one 8-bit RGB triple. Everything upstream of it (decoders,
// 16-bit sources, alpha) is reduced to this shape at sampling time, and everything
// downstream (bucketing, averaging, formatting) only ever sees these three channels.
//
// Key principles:
// 1) No alpha. Transparency is dropped when a source pixel becomes a `Color`.
// 2) Copy semantics. A `Color` is three bytes; buckets sort and average by value.
// 3) Channels are addressable by `Component` so the quantizer can pick a split
//    axis without matching on field names everywhere.

pub mod color {
    pub type Channel = u8;
    pub type WideChannel = u16;

    /// Linear 16-bit to 8-bit scale: 65535 / 257 == 255.
    const DOWNSAMPLE_DIVISOR: WideChannel = 257;

    /// One of the three color channels, in tie-break priority order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Component {
        Red,
        Green,
        Blue,
    }

    /// An opaque 8-bit RGB color.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Color {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Color {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }

        /// Downsamples a 16-bit-per-channel pixel, truncating. Alpha is ignored.
        pub fn from_rgba16(
            red: WideChannel,
            green: WideChannel,
            blue: WideChannel,
            _alpha: WideChannel,
        ) -> Self {
            Self {
                red: downsample(red),
                green: downsample(green),
                blue: downsample(blue),
            }
        }

        pub fn component(&self, component: Component) -> Channel {
            match component {
                Component::Red => self.red,
                Component::Green => self.green,
                Component::Blue => self.blue,
            }
        }
    }

    #[inline]
    fn downsample(value: WideChannel) -> Channel {
        (value / DOWNSAMPLE_DIVISOR) as Channel
    }

    impl From<Color> for [Channel; 3] {
        fn from(color: Color) -> Self {
            [color.red, color.green, color.blue]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::color::*;

    #[test]
    fn downsampling_truncates() {
        assert_eq!(Color::from_rgba16(257, 0, 0, 65535), Color::new(1, 0, 0));
        assert_eq!(Color::from_rgba16(513, 256, 65535, 0), Color::new(1, 0, 255));
    }

    #[test]
    fn alpha_has_no_effect() {
        let opaque = Color::from_rgba16(40_000, 20_000, 10_000, 65535);
        let transparent = Color::from_rgba16(40_000, 20_000, 10_000, 0);
        assert_eq!(opaque, transparent);
    }

    #[test]
    fn components_address_channels() {
        let color = Color::new(10, 20, 30);
        assert_eq!(color.component(Component::Red), 10);
        assert_eq!(color.component(Component::Green), 20);
        assert_eq!(color.component(Component::Blue), 30);
        assert_eq!(<[u8; 3]>::from(color), [10, 20, 30]);
    }
}
