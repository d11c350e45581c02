/// Finite state machine over the 24 right-handed orientations of a block
///
/// Every state links to 6 other states, one for each quarter roll clockwise or
/// counter-clockwise about the world X, Y and Z axes. The graph is built once
/// and only read afterwards, so states are plain indices into fixed tables.
use nalgebra::Matrix3;
use std::fmt;
use std::sync::OnceLock;

use crate::axis::AxisDirection::{NegX, NegY, NegZ, PosX, PosY, PosZ};
use crate::axis::{AxisDirection, RollEdge, Sign, Turn, WorldAxis};

pub const STATE_COUNT: usize = 24;
pub const EDGE_COUNT: usize = 6;

/// The 4 directions orthogonal to each face normal, in clockwise order.
/// Indexed by `AxisDirection::index` of the normal.
const ORTHOGONAL_RINGS: [[AxisDirection; 4]; 6] = [
    [PosZ, PosY, NegZ, NegY],
    [NegZ, PosY, PosZ, NegY],
    [PosZ, NegX, NegZ, PosX],
    [PosZ, PosX, NegZ, NegX],
    [NegX, PosY, PosX, NegY],
    [PosX, PosY, NegX, NegY],
];

static GRAPH: OnceLock<OrientationGraph> = OnceLock::new();

/// Rotate `orthogonal` a quarter turn about `rotation` by stepping through the ring.
///
/// # Panics
/// If `orthogonal` is not orthogonal to `rotation`.
fn next(rotation: AxisDirection, orthogonal: AxisDirection, turn: Turn) -> AxisDirection {
    let ring = &ORTHOGONAL_RINGS[rotation.index()];
    match ring.iter().position(|axis| *axis == orthogonal) {
        Some(i) => ring[(i as isize + turn.step()).rem_euclid(4) as usize],
        None => panic!("{orthogonal} is missing from the orthogonal ring of {rotation}"),
    }
}

/// One of the block's body-fixed axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalAxis {
    X,
    Y,
    Z,
}

impl LocalAxis {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which world axis each local axis lies on, named local X, Y, Z in order.
/// `Yzx` means local X lies on world Y, local Y on world Z and local Z on world X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRoles {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zyx,
    Zxy,
}

impl AxisRoles {
    pub fn of(x: AxisDirection, y: AxisDirection) -> Self {
        if x.is_x_aligned() {
            if y.is_y_aligned() {
                AxisRoles::Xyz
            } else {
                AxisRoles::Xzy
            }
        } else if x.is_y_aligned() {
            if y.is_x_aligned() {
                AxisRoles::Yxz
            } else {
                AxisRoles::Yzx
            }
        } else if y.is_y_aligned() {
            AxisRoles::Zyx
        } else {
            AxisRoles::Zxy
        }
    }

    /// The local axis currently lying on `axis`.
    pub fn local_for(self, axis: WorldAxis) -> LocalAxis {
        use LocalAxis::{X, Y, Z};
        let [on_x, on_y, on_z] = match self {
            AxisRoles::Xyz => [X, Y, Z],
            AxisRoles::Xzy => [X, Z, Y],
            AxisRoles::Yxz => [Y, X, Z],
            AxisRoles::Yzx => [Z, X, Y],
            AxisRoles::Zyx => [Z, Y, X],
            AxisRoles::Zxy => [Y, Z, X],
        };
        match axis {
            WorldAxis::X => on_x,
            WorldAxis::Y => on_y,
            WorldAxis::Z => on_z,
        }
    }
}

/// Handle to one of the 24 orientation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation(u8);

impl Orientation {
    /// Local axes aligned with world axes: `(+X,+Y,+Z)`.
    pub const BASE: Orientation = Orientation(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < STATE_COUNT).then(|| Orientation(index as u8))
    }

    pub fn local_axes(self) -> [AxisDirection; 3] {
        OrientationGraph::global().local_axes(self)
    }

    pub fn local_axis(self, axis: LocalAxis) -> AxisDirection {
        self.local_axes()[axis.index()]
    }

    pub fn x_axis(self) -> AxisDirection {
        self.local_axis(LocalAxis::X)
    }

    pub fn y_axis(self) -> AxisDirection {
        self.local_axis(LocalAxis::Y)
    }

    pub fn roles(self) -> AxisRoles {
        AxisRoles::of(self.x_axis(), self.y_axis())
    }

    /// The local axis direction lying on the given world axis.
    pub fn aligned_with(self, axis: WorldAxis) -> AxisDirection {
        self.local_axis(self.roles().local_for(axis))
    }

    /// The edge realizing a roll about the world `axis` in the direction of `sign`.
    ///
    /// Edges are labelled relative to the local axis lying on `axis`, so the
    /// turn flips when that local axis points the negative way.
    pub fn roll_edge(self, axis: WorldAxis, sign: Sign) -> RollEdge {
        let sign = if self.aligned_with(axis).is_positive() {
            sign
        } else {
            sign.flip()
        };
        RollEdge::new(axis, Turn::from_sign(sign))
    }

    pub fn follow(self, edge: RollEdge) -> Orientation {
        OrientationGraph::global().follow(self, edge)
    }

    pub fn matrix(self) -> Matrix3<f64> {
        OrientationGraph::global().orientation_matrix(self)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.local_axes();
        write!(f, "({x},{y},{z})")
    }
}

/// The immutable orientation state graph.
#[derive(Debug)]
pub struct OrientationGraph {
    axes: [[AxisDirection; 3]; STATE_COUNT],
    edges: [[Orientation; EDGE_COUNT]; STATE_COUNT],
}

impl OrientationGraph {
    /// The process-wide graph, built on first use.
    pub fn global() -> &'static OrientationGraph {
        GRAPH.get_or_init(Self::build)
    }

    fn build() -> Self {
        // Build all 24 states a right handed coordinate system allows
        let mut axes = [[PosX; 3]; STATE_COUNT];
        let mut by_pair: [[Option<Orientation>; 6]; 6] = [[None; 6]; 6];
        for x in AxisDirection::ALL {
            let ring = &ORTHOGONAL_RINGS[x.index()];
            for i in 0..4 {
                let id = x.index() * 4 + i;
                let y = ring[(i + 1) % 4];
                let z = ring[i];
                axes[id] = [x, y, z];
                by_pair[x.index()][y.index()] = Some(Orientation(id as u8));
            }
        }

        let state = |x: AxisDirection, y: AxisDirection| match by_pair[x.index()][y.index()] {
            Some(state) => state,
            None => panic!("no orientation with local axes {x},{y}"),
        };

        // Link all states, 6 links each for a total of 144
        let mut edges = [[Orientation::BASE; EDGE_COUNT]; STATE_COUNT];
        for (id, &[x, y, z]) in axes.iter().enumerate() {
            let roles = AxisRoles::of(x, y);
            for edge in RollEdge::ALL {
                let turn = edge.turn;
                edges[id][edge.index()] = match roles.local_for(edge.axis) {
                    LocalAxis::X => state(x, next(x, y, turn)),
                    LocalAxis::Y => state(next(y, x, turn), y),
                    LocalAxis::Z => state(next(z, x, turn), next(z, y, turn)),
                };
            }
        }

        log::debug!(
            "built orientation graph with {} states and {} edges",
            STATE_COUNT,
            STATE_COUNT * EDGE_COUNT
        );
        Self { axes, edges }
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn base(&self) -> Orientation {
        Orientation::BASE
    }

    pub fn states(&self) -> impl Iterator<Item = Orientation> {
        (0..STATE_COUNT as u8).map(Orientation)
    }

    pub fn local_axes(&self, state: Orientation) -> [AxisDirection; 3] {
        self.axes[state.index()]
    }

    pub fn roles(&self, state: Orientation) -> AxisRoles {
        let [x, y, _] = self.local_axes(state);
        AxisRoles::of(x, y)
    }

    /// Find the state with the given local axes, if they form a right-handed frame.
    pub fn find(&self, x: AxisDirection, y: AxisDirection, z: AxisDirection) -> Option<Orientation> {
        self.states().find(|state| self.local_axes(*state) == [x, y, z])
    }

    pub fn edge(&self, state: Orientation, axis: WorldAxis, turn: Turn) -> Orientation {
        self.follow(state, RollEdge::new(axis, turn))
    }

    pub fn follow(&self, state: Orientation, edge: RollEdge) -> Orientation {
        self.edges[state.index()][edge.index()]
    }

    /// Write the state's local X, Y and Z unit vectors into the columns of `store`.
    pub fn update_orientation_matrix(&self, state: Orientation, store: &mut Matrix3<f64>) {
        for (column, axis) in self.local_axes(state).iter().enumerate() {
            store.set_column(column, &axis.unit_vector());
        }
    }

    pub fn orientation_matrix(&self, state: Orientation) -> Matrix3<f64> {
        let mut matrix = Matrix3::zeros();
        self.update_orientation_matrix(state, &mut matrix);
        matrix
    }
}
