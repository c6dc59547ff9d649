//! Face turns and the sticker permutation they perform.
//!
//! Each of the six faces owns a fixed 3x3 layer of cubie indices and a cycle
//! of five faces: the turning face itself followed by the four side faces in
//! the order a quarter turn carries stickers between them.

use std::f32::consts::PI;

use crate::cube::{Cubie, Face};

/// Fixed topology of one face turn.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TurnLayer {
    /// Cubie indices of the layer, row by row as seen from the turning face.
    pub(crate) indices: [usize; 9],
    /// Turning face, then the side faces in rotational order.
    pub(crate) cycle: [Face; 5],
    /// Rotation axis of the animation (0 = x, 1 = y, 2 = z).
    pub(crate) axis: usize,
    /// Sign of the animation angle for a normal (non-prime) turn.
    pub(crate) sign: f32,
}

/// Side-strip positions within a layer, one strip per side face of the
/// cycle. A quarter turn moves each strip's stickers into the previous strip.
const STRIPS: [[usize; 3]; 4] = [[0, 1, 2], [6, 3, 0], [8, 7, 6], [2, 5, 8]];

#[rustfmt::skip]
const FRONT: TurnLayer = TurnLayer {
    indices: [0, 1, 2, 3, 4, 5, 6, 7, 8],
    cycle: [Face::Front, Face::Top, Face::Left, Face::Bottom, Face::Right],
    axis: 2,
    sign: 1.0,
};

#[rustfmt::skip]
const BACK: TurnLayer = TurnLayer {
    indices: [19, 18, 17, 22, 21, 20, 25, 24, 23],
    cycle: [Face::Back, Face::Top, Face::Right, Face::Bottom, Face::Left],
    axis: 2,
    sign: -1.0,
};

#[rustfmt::skip]
const UP: TurnLayer = TurnLayer {
    indices: [17, 18, 19, 9, 10, 11, 0, 1, 2],
    cycle: [Face::Top, Face::Back, Face::Left, Face::Front, Face::Right],
    axis: 1,
    sign: -1.0,
};

#[rustfmt::skip]
const DOWN: TurnLayer = TurnLayer {
    indices: [6, 7, 8, 14, 15, 16, 23, 24, 25],
    cycle: [Face::Bottom, Face::Front, Face::Left, Face::Back, Face::Right],
    axis: 1,
    sign: 1.0,
};

#[rustfmt::skip]
const LEFT: TurnLayer = TurnLayer {
    indices: [17, 9, 0, 20, 12, 3, 23, 14, 6],
    cycle: [Face::Left, Face::Top, Face::Back, Face::Bottom, Face::Front],
    axis: 0,
    sign: -1.0,
};

#[rustfmt::skip]
const RIGHT: TurnLayer = TurnLayer {
    indices: [2, 11, 19, 5, 13, 22, 8, 16, 25],
    cycle: [Face::Right, Face::Top, Face::Front, Face::Bottom, Face::Back],
    axis: 0,
    sign: 1.0,
};

impl Face {
    /// Layer topology of a turn of this face.
    pub(crate) fn turn_layer(self) -> &'static TurnLayer {
        match self {
            Face::Front => &FRONT,
            Face::Back => &BACK,
            Face::Top => &UP,
            Face::Bottom => &DOWN,
            Face::Left => &LEFT,
            Face::Right => &RIGHT,
        }
    }

    /// Conventional single-letter turn name.
    pub(crate) fn notation(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Top => 'U',
            Face::Bottom => 'D',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }
}

/// A quarter turn of one face, clockwise or (when `prime`) counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Turn {
    pub(crate) face: Face,
    pub(crate) prime: bool,
}

impl Turn {
    /// The twelve canonical turns.
    pub(crate) const ALL: [Turn; 12] = [
        Turn::new(Face::Front, false),
        Turn::new(Face::Front, true),
        Turn::new(Face::Back, false),
        Turn::new(Face::Back, true),
        Turn::new(Face::Top, false),
        Turn::new(Face::Top, true),
        Turn::new(Face::Bottom, false),
        Turn::new(Face::Bottom, true),
        Turn::new(Face::Left, false),
        Turn::new(Face::Left, true),
        Turn::new(Face::Right, false),
        Turn::new(Face::Right, true),
    ];

    pub(crate) const fn new(face: Face, prime: bool) -> Self {
        Self { face, prime }
    }

    #[cfg(test)]
    pub(crate) fn inverse(self) -> Self {
        Self::new(self.face, !self.prime)
    }

    pub(crate) fn layer(self) -> &'static TurnLayer {
        self.face.turn_layer()
    }

    /// Angle added to each layer cubie per animation frame so that the layer
    /// has turned a quarter after `frames` frames.
    pub(crate) fn frame_delta(self, frames: u32) -> f32 {
        let sign = if self.prime {
            -self.layer().sign
        } else {
            self.layer().sign
        };
        sign * PI / (2.0 * frames as f32)
    }

    /// Number of logical quarter turns this turn amounts to. A prime turn is
    /// three quarter turns in the normal direction.
    pub(crate) fn quarter_turns(self) -> usize {
        if self.prime { 3 } else { 1 }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.face.notation())?;
        if self.prime {
            write!(f, "'")?;
        }
        Ok(())
    }
}

/// Permutes stickers for one quarter turn of `layer`.
///
/// The turning face's own stickers rotate through two 4-cycles (corners and
/// edges), and the side strips shift one step along the face cycle.
pub(crate) fn quarter_turn(cubies: &mut [Cubie], layer: &TurnLayer) {
    let [face, sides @ ..] = layer.cycle;
    let at = |position: usize| layer.indices[position];

    cycle_face(cubies, face, [at(0), at(6), at(8), at(2)]);
    cycle_face(cubies, face, [at(1), at(3), at(7), at(5)]);

    let saved = STRIPS[0].map(|position| cubies[at(position)].face(sides[0]));
    for k in 0..3 {
        for (dst, src) in STRIPS[k].into_iter().zip(STRIPS[k + 1]) {
            let color = cubies[at(src)].face(sides[k + 1]);
            cubies[at(dst)].set_face(sides[k], color);
        }
    }
    for (dst, color) in STRIPS[3].into_iter().zip(saved) {
        cubies[at(dst)].set_face(sides[3], color);
    }
}

/// Moves `face` stickers one step backwards around `ring`: the first slot
/// takes the second's color, and so on, with the last taking the first's.
fn cycle_face(cubies: &mut [Cubie], face: Face, ring: [usize; 4]) {
    let first = cubies[ring[0]].face(face);
    for pair in ring.windows(2) {
        let color = cubies[pair[1]].face(face);
        cubies[pair[0]].set_face(face, color);
    }
    cubies[ring[3]].set_face(face, first);
}
