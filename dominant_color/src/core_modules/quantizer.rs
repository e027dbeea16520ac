// THEORY:
// The quantizer is the algorithmic core: a median-cut partition over a mutable slice
// of colors. Each call either reduces its bucket to one averaged color or splits it in
// two along the channel with the widest range and recurses into both halves.
//
// Split rules, in order:
// 1.  Terminate when `depth` reaches `max_depth` or the bucket is empty.
// 2.  Pick the channel with the largest (max - min); ties go red, then green, then blue.
// 3.  Stable-sort the bucket descending on that channel.
// 4.  Split at `mid = len / 2` into `[0, mid)` and `[mid + 1, len)`. The element at
//     `mid` belongs to neither half.
// 5.  Recurse left, then right, and concatenate their colors in that order.
//
// Empty buckets emit nothing. A single-pixel bucket split before `max_depth` yields
// two empty halves, so when neither half emits, the bucket emits its own average.
// The engine's answer is always the first color the partition produces.

pub mod quantizer {
    use crate::core_modules::color::color::{Channel, Color, Component};
    use std::cmp::Reverse;

    pub const DEFAULT_MAX_DEPTH: usize = 1;

    /// Per-channel `max - min` across a bucket.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ChannelRanges {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    /// A median-cut partitioner with an explicit recursion limit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Quantizer {
        max_depth: usize,
    }

    impl Default for Quantizer {
        fn default() -> Self {
            Self::new(DEFAULT_MAX_DEPTH)
        }
    }

    impl Quantizer {
        pub fn new(max_depth: usize) -> Self {
            Self { max_depth }
        }

        pub fn max_depth(&self) -> usize {
            self.max_depth
        }

        /// Partitions `pixels` (reordering them) and returns one color per
        /// non-empty terminal bucket, leftmost first.
        pub fn quantize(&self, pixels: &mut [Color]) -> Vec<Color> {
            let mut colors = Vec::with_capacity(1 << self.max_depth.min(16));
            self.partition(pixels, 0, &mut colors);
            colors
        }

        /// The first color of the partition. `None` only for an empty input.
        pub fn dominant(&self, pixels: &mut [Color]) -> Option<Color> {
            self.quantize(pixels).into_iter().next()
        }

        fn partition(&self, bucket: &mut [Color], depth: usize, colors: &mut Vec<Color>) {
            if depth >= self.max_depth || bucket.is_empty() {
                colors.extend(average(bucket));
                return;
            }

            let component = widest_component(bucket);
            sort_descending(bucket, component);

            let emitted = colors.len();
            let (left, right) = split_excluding_median(bucket);
            self.partition(left, depth + 1, colors);
            self.partition(right, depth + 1, colors);

            if colors.len() == emitted {
                colors.extend(average(bucket));
            }
        }
    }

    /// Integer-truncated per-channel mean. `None` for an empty bucket.
    pub fn average(bucket: &[Color]) -> Option<Color> {
        if bucket.is_empty() {
            return None;
        }

        let (mut sum_r, mut sum_g, mut sum_b) = (0u64, 0u64, 0u64);
        for color in bucket {
            sum_r += color.red as u64;
            sum_g += color.green as u64;
            sum_b += color.blue as u64;
        }

        let len = bucket.len() as u64;
        Some(Color::new(
            (sum_r / len) as Channel,
            (sum_g / len) as Channel,
            (sum_b / len) as Channel,
        ))
    }

    pub fn channel_ranges(bucket: &[Color]) -> ChannelRanges {
        let Some(first) = bucket.first() else {
            return ChannelRanges::default();
        };

        let (mut min, mut max) = (*first, *first);
        for color in bucket {
            min.red = min.red.min(color.red);
            min.green = min.green.min(color.green);
            min.blue = min.blue.min(color.blue);
            max.red = max.red.max(color.red);
            max.green = max.green.max(color.green);
            max.blue = max.blue.max(color.blue);
        }

        ChannelRanges {
            red: max.red - min.red,
            green: max.green - min.green,
            blue: max.blue - min.blue,
        }
    }

    /// The split axis: first channel, in red/green/blue order, with the largest range.
    pub fn widest_component(bucket: &[Color]) -> Component {
        let ranges = channel_ranges(bucket);
        if ranges.red >= ranges.green && ranges.red >= ranges.blue {
            Component::Red
        } else if ranges.green >= ranges.blue {
            Component::Green
        } else {
            Component::Blue
        }
    }

    pub fn sort_descending(bucket: &mut [Color], component: Component) {
        bucket.sort_by_key(|color| Reverse(color.component(component)));
    }

    /// Splits around `len / 2`, dropping the median element from both halves.
    pub fn split_excluding_median(bucket: &mut [Color]) -> (&mut [Color], &mut [Color]) {
        let mid = bucket.len() / 2;
        let (left, rest) = bucket.split_at_mut(mid);
        let right = rest.get_mut(1..).unwrap_or_default();
        (left, right)
    }
}
