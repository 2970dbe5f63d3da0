use ai_nav::map::footprint_tiles;
use ai_nav::{DoorSolidMethod, NodePoint, NodeProcessor, Path, Pathfinder, RegionRegistry, TileMap, Vec2};

use crate::game::Game;

/// Grid navigation state owned by one bot.
pub struct Navigation {
    pathfinder: Pathfinder,
    regions: RegionRegistry,
    current_path: Path,
    /// Radius the edge cache was built for; `None` until the first rebuild or
    /// after a map load.
    built_radius: Option<f32>,
}

impl Navigation {
    pub fn new(door_method: DoorSolidMethod) -> Self {
        Self {
            pathfinder: Pathfinder::new(NodeProcessor::new(door_method)),
            regions: RegionRegistry::empty(),
            current_path: Path::empty(),
            built_radius: None,
        }
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    pub fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    pub fn built_radius(&self) -> Option<f32> {
        self.built_radius
    }

    pub fn needs_rebuild(&self, radius: f32) -> bool {
        match self.built_radius {
            Some(built) => (built - radius).abs() > f32::EPSILON,
            None => true,
        }
    }

    /// Marks the edge cache stale and drops the current path.
    pub fn invalidate(&mut self) {
        self.built_radius = None;
        self.regions = RegionRegistry::empty();
        self.current_path = Path::empty();
    }

    /// Full edge and region rebuild. Returns the traversable cell count.
    pub fn rebuild<M: TileMap>(&mut self, map: &M, radius: f32) -> usize {
        let traversable = self.pathfinder.processor_mut().rebuild(map, radius);
        self.regions = RegionRegistry::build(self.pathfinder.processor());
        self.built_radius = Some(radius);
        self.current_path = Path::empty();
        traversable
    }

    /// Local edge patch around each point.
    ///
    /// Regions absorb any new links. The current path is dropped when a
    /// waypoint lies inside a patched square.
    pub fn patch<M: TileMap>(&mut self, map: &M, points: &[NodePoint]) -> usize {
        let Some(radius) = self.built_radius else {
            return 0;
        };
        let mut cells = 0;
        for &p in points {
            cells += self.pathfinder.processor_mut().patch(map, p);
            self.regions.absorb_patch(self.pathfinder.processor(), p);
        }

        let reach = i32::from(footprint_tiles(radius)) + 1;
        let crosses = self.current_path.points().iter().any(|&w| {
            NodePoint::from_world(w).is_some_and(|cell| {
                points.iter().any(|p| {
                    (i32::from(cell.x) - i32::from(p.x)).abs() <= reach
                        && (i32::from(cell.y) - i32::from(p.y)).abs() <= reach
                })
            })
        });
        if crosses {
            tracing::debug!(points = points.len(), "Dropping path crossed by patch");
            self.current_path = Path::empty();
        }
        cells
    }

    pub fn door_method(&self) -> DoorSolidMethod {
        self.pathfinder.processor().door_method()
    }

    pub fn set_door_method(&mut self, method: DoorSolidMethod) {
        self.pathfinder.processor_mut().set_door_method(method);
    }

    /// Region pre-check, then A*. Empty when unreachable or not yet built.
    pub fn find_path<M: TileMap>(&mut self, map: &M, from: Vec2, to: Vec2) -> Path {
        let Some(radius) = self.built_radius else {
            return Path::empty();
        };
        if !self.regions.connected(from, to) {
            tracing::debug!(?from, ?to, "Skipping search between disconnected regions");
            return Path::empty();
        }
        self.pathfinder.find_path(map, from, to, radius)
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn set_current_path(&mut self, path: Path) {
        self.current_path = path;
    }

    pub fn clear_path(&mut self) {
        self.current_path = Path::empty();
    }
}

impl core::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Navigation")
            .field("built_radius", &self.built_radius)
            .field("regions", &self.regions.region_count())
            .field("path_len", &self.current_path.len())
            .finish()
    }
}

/// The agent behavior nodes run against.
pub struct Bot<G: Game> {
    pub game: G,
    pub nav: Navigation,
}

impl<G: Game> Bot<G> {
    pub fn new(game: G, door_method: DoorSolidMethod) -> Self {
        Self {
            game,
            nav: Navigation::new(door_method),
        }
    }

    /// Path search from `from` to `to` on the game's current map.
    pub fn find_path(&mut self, from: Vec2, to: Vec2) -> Path {
        self.nav.find_path(self.game.map(), from, to)
    }
}
