//! # Coordinate Codec Integration Test
//!
//! The packed index and its inverse must agree over the entire domain,
//! for the default world and for odd-sized ones.

use rogue_core::{pack, unpack, GridDims, PackedIndex, SparseTileGrid, Tile, TileCoord};

fn assert_round_trip(dims: GridDims) {
    for y in 0..dims.height() {
        for x in 0..dims.width() {
            let coord = TileCoord::new(x, y);
            let index = dims.index(coord);
            assert_eq!(dims.coord(index), coord, "round trip failed at ({x}, {y})");
            assert!(index.value() < dims.cell_count() as u64);
        }
    }
}

#[test]
fn test_round_trip_default_world() {
    assert_round_trip(GridDims::DEFAULT);
}

#[test]
fn test_round_trip_odd_sizes() {
    for (w, h) in [(1, 1), (1, 17), (17, 1), (3, 5), (128, 128), (255, 33)] {
        assert_round_trip(GridDims::new(w, h).unwrap());
    }
}

#[test]
fn test_index_to_coord_direction() {
    // Every index in the domain maps to a coordinate that packs back to it.
    let dims = GridDims::new(37, 11).unwrap();
    for raw in 0..dims.cell_count() as u64 {
        let index = PackedIndex(raw);
        assert_eq!(pack(unpack(index, dims.width()), dims.width()), index);
    }
}

#[test]
fn test_documented_example() {
    assert_eq!(pack(TileCoord::new(5, 2), 128).value(), 261);
    assert_eq!(unpack(PackedIndex(261), 128), TileCoord::new(5, 2));
}

#[test]
fn test_full_grid_population_is_dense() {
    let dims = GridDims::new(32, 24).unwrap();
    let mut grid = SparseTileGrid::new(dims);
    grid.reserve(dims.cell_count());

    for y in 0..dims.height() {
        for x in 0..dims.width() {
            grid.set(TileCoord::new(x, y), Tile::new(x + y));
        }
    }

    assert_eq!(grid.len(), dims.cell_count());
    for (coord, tile) in grid.iter() {
        assert!(dims.contains(coord));
        assert_eq!(tile.sprite_index, coord.x + coord.y);
    }
}
