//! Binary file formats.
//!
//! Three little-endian formats, all headered with u32 counts:
//!
//! - `.fbin` points: count n, dimension d, then n·d f32 coordinates,
//! - ground truth: query count, neighbors per query k, then n·k u32 ids,
//! - graph files: vertex count, then per vertex a u32 degree and that many
//!   u32 neighbor ids in insertion order.

use crate::graph::AdjacencyLists;
use crate::points::PointSet;
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an `.fbin` point file, optionally truncating to the first
/// `head_size` points.
pub fn read_fbin<P: AsRef<Path>>(path: P, head_size: Option<usize>) -> Result<PointSet> {
    let file = File::open(&path).map_err(|e| {
        Error::Input(format!("{}: {}", path.as_ref().display(), e))
    })?;
    let mut reader = BufReader::new(file);

    let n = reader.read_u32::<LittleEndian>()? as usize;
    let d = reader.read_u32::<LittleEndian>()? as usize;
    if n > 0 && d == 0 {
        return Err(Error::Input(format!(
            "{}: zero dimension in header",
            path.as_ref().display()
        ))
        .into());
    }

    let take = head_size.map_or(n, |h| h.min(n));
    let mut data = vec![0.0f32; take * d];
    reader.read_f32_into::<LittleEndian>(&mut data)?;

    PointSet::new(data, d)
}

/// Write a point set as `.fbin`.
pub fn write_fbin<P: AsRef<Path>>(path: P, points: &PointSet) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_u32::<LittleEndian>(points.len() as u32)?;
    writer.write_u32::<LittleEndian>(points.dim() as u32)?;
    for &value in points.as_flat() {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Read a ground-truth file: the k nearest dataset ids per query.
pub fn read_ground_truth<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u32>>> {
    let file = File::open(&path).map_err(|e| {
        Error::Input(format!("{}: {}", path.as_ref().display(), e))
    })?;
    let mut reader = BufReader::new(file);

    let n = reader.read_u32::<LittleEndian>()? as usize;
    let k = reader.read_u32::<LittleEndian>()? as usize;

    let mut neighbors = Vec::with_capacity(n);
    for _ in 0..n {
        let mut row = vec![0u32; k];
        reader.read_u32_into::<LittleEndian>(&mut row)?;
        neighbors.push(row);
    }
    Ok(neighbors)
}

/// Write a ground-truth file.
pub fn write_ground_truth<P: AsRef<Path>>(path: P, neighbors: &[Vec<u32>]) -> Result<()> {
    let k = neighbors.first().map_or(0, |row| row.len());
    for row in neighbors {
        if row.len() != k {
            return Err(Error::Input(format!(
                "ragged ground truth: expected {} neighbors, got {}",
                k,
                row.len()
            ))
            .into());
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_u32::<LittleEndian>(neighbors.len() as u32)?;
    writer.write_u32::<LittleEndian>(k as u32)?;
    for row in neighbors {
        for &id in row {
            writer.write_u32::<LittleEndian>(id)?;
        }
    }
    Ok(())
}

/// Write adjacency lists as a graph file.
pub fn write_graph<P: AsRef<Path>>(path: P, adjlists: &AdjacencyLists) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_u32::<LittleEndian>(adjlists.len() as u32)?;
    for adjlist in adjlists {
        writer.write_u32::<LittleEndian>(adjlist.len() as u32)?;
        for &neighbor in adjlist {
            writer.write_u32::<LittleEndian>(neighbor)?;
        }
    }
    Ok(())
}

/// Read a graph file back into adjacency lists.
pub fn read_graph<P: AsRef<Path>>(path: P) -> Result<AdjacencyLists> {
    let file = File::open(&path).map_err(|e| {
        Error::Input(format!("{}: {}", path.as_ref().display(), e))
    })?;
    let mut reader = BufReader::new(file);

    let n = reader.read_u32::<LittleEndian>()? as usize;
    let mut adjlists = Vec::with_capacity(n);
    for _ in 0..n {
        let degree = reader.read_u32::<LittleEndian>()? as usize;
        let mut adjlist = vec![0u32; degree];
        reader.read_u32_into::<LittleEndian>(&mut adjlist)?;
        adjlists.push(adjlist);
    }
    Ok(adjlists)
}
