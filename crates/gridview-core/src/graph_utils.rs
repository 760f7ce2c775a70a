use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};

use crate::{CableId, EntityId, FuseId, Grid};

/// One connected group of entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandSummary {
    pub island_id: usize,
    pub entities: Vec<EntityId>,
}

/// Aggregated island analysis result.
#[derive(Debug, Clone, Default)]
pub struct IslandAnalysis {
    pub islands: Vec<IslandSummary>,
    /// Cables with at least one open fuse (they do not connect anything).
    pub open_cables: Vec<CableId>,
    /// Cables whose fuses are not mounted in any entity.
    pub dangling_cables: Vec<CableId>,
}

/// Build the entity graph where an edge is a cable with both fuses closed.
pub fn energized_graph<F>(grid: &Grid, is_closed: F) -> (UnGraph<EntityId, CableId>, IslandAnalysis)
where
    F: Fn(FuseId) -> bool,
{
    let mut graph = UnGraph::<EntityId, CableId>::new_undirected();
    let mut nodes: HashMap<EntityId, NodeIndex> = HashMap::new();
    for id in grid.entities.keys() {
        nodes.insert(*id, graph.add_node(*id));
    }

    let mut owner: HashMap<FuseId, EntityId> = HashMap::new();
    for entity in grid.entities.values() {
        for fuse in &entity.fuses {
            owner.insert(*fuse, entity.id);
        }
    }

    let mut analysis = IslandAnalysis::default();
    for cable in grid.cables.values() {
        let ends = (owner.get(&cable.fuse1), owner.get(&cable.fuse2));
        let (Some(a), Some(b)) = ends else {
            analysis.dangling_cables.push(cable.id);
            continue;
        };
        if !(is_closed(cable.fuse1) && is_closed(cable.fuse2)) {
            analysis.open_cables.push(cable.id);
            continue;
        }
        graph.add_edge(nodes[a], nodes[b], cable.id);
    }

    (graph, analysis)
}

/// Labels connected groups of entities (breadth-first search) given the
/// current fuse states.
pub fn find_islands<F>(grid: &Grid, is_closed: F) -> IslandAnalysis
where
    F: Fn(FuseId) -> bool,
{
    let (graph, mut analysis) = energized_graph(grid, is_closed);

    let mut visited = HashSet::new();
    let mut island_id = 0;
    for start in graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut members = Vec::new();
        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            members.push(graph[node]);
            for neighbor in graph.neighbors(node) {
                if !visited.contains(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        members.sort();
        analysis.islands.push(IslandSummary {
            island_id,
            entities: members,
        });
        island_id += 1;
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cable, Entity, EntityType, Fuse};

    fn two_substations_one_cable() -> Grid {
        let mut grid = Grid::new();
        for (entity, fuse) in [(1, 0), (2, 1)] {
            let mut e = Entity::new(EntityId::new(entity), EntityType::Substation);
            e.fuses.push(FuseId::new(fuse));
            grid.entities.insert(e.id, e);
            grid.fuses.insert(FuseId::new(fuse), Fuse::new(FuseId::new(fuse)));
        }
        let third = Entity::new(EntityId::new(3), EntityType::Cabinet);
        grid.entities.insert(third.id, third);
        grid.cables.insert(
            CableId::new(0),
            Cable::new(CableId::new(0), FuseId::new(0), FuseId::new(1)),
        );
        grid
    }

    #[test]
    fn closed_cable_joins_entities() {
        let grid = two_substations_one_cable();
        let analysis = find_islands(&grid, |_| true);
        assert_eq!(analysis.islands.len(), 2);
        assert_eq!(
            analysis.islands[0].entities,
            vec![EntityId::new(1), EntityId::new(2)]
        );
        assert!(analysis.open_cables.is_empty());
    }

    #[test]
    fn open_fuse_splits_island() {
        let grid = two_substations_one_cable();
        let analysis = find_islands(&grid, |fuse| fuse != FuseId::new(1));
        assert_eq!(analysis.islands.len(), 3);
        assert_eq!(analysis.open_cables, vec![CableId::new(0)]);
    }

    #[test]
    fn cables_without_entities_are_dangling() {
        let mut grid = Grid::new();
        grid.cables.insert(
            CableId::new(7),
            Cable::new(CableId::new(7), FuseId::new(0), FuseId::new(1)),
        );
        let analysis = find_islands(&grid, |_| true);
        assert!(analysis.islands.is_empty());
        assert_eq!(analysis.dangling_cables, vec![CableId::new(7)]);
    }
}
