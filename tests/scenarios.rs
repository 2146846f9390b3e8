//! End-to-end conversions through the public API.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use rastervec::{
    convert, to_svg, Colour, Config, DocumentSummary, ElementShape, FillRef, GroupingMode,
    PixelGrid, Point,
};

fn config(grouping: GroupingMode, gradients: bool) -> Config {
    Config {
        grouping,
        gradients,
        ..Config::default()
    }
}

fn polygon_vertices(shape: &ElementShape) -> Vec<Point> {
    match shape {
        ElementShape::Polygon(p) => p.vertices().to_vec(),
        ElementShape::Cell(_) => panic!("expected polygon"),
    }
}

#[test]
fn uniform_red_square_becomes_one_rectangle() {
    let red = Colour::rgb(255, 0, 0);
    let grid = PixelGrid::filled(10, 10, red);

    let doc = convert(&grid, &config(GroupingMode::Color, false));

    assert_eq!(doc.elements().len(), 1);
    let element = &doc.elements()[0];
    assert_eq!(
        polygon_vertices(&element.shape),
        vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10)
        ]
    );
    assert_eq!(element.fill, FillRef::Colour(red));
    assert_eq!(element.opacity, 1.0);
    assert!(doc.gradients().is_empty());
}

#[test]
fn two_disjoint_blocks_get_their_own_fills() {
    let green = Colour::rgb(0, 255, 0);
    let blue = Colour::rgb(0, 0, 255);
    let mut rows = vec![vec![Colour::TRANSPARENT; 16]; 5];
    for row in rows.iter_mut() {
        for px in row.iter_mut().take(5) {
            *px = green;
        }
        for px in row.iter_mut().skip(10).take(5) {
            *px = blue;
        }
    }
    let grid = PixelGrid::from_rows(&rows);

    let doc = convert(&grid, &config(GroupingMode::Color, true));

    assert_eq!(doc.elements().len(), 2);
    assert_eq!(doc.elements()[0].fill, FillRef::Colour(green));
    assert_eq!(doc.elements()[1].fill, FillRef::Colour(blue));

    let first: HashSet<Point> = polygon_vertices(&doc.elements()[0].shape).into_iter().collect();
    let second: HashSet<Point> = polygon_vertices(&doc.elements()[1].shape).into_iter().collect();
    assert!(first.is_disjoint(&second));
}

#[test]
fn transparent_grid_is_empty_for_every_mode() {
    let grid = PixelGrid::filled(50, 50, Colour::TRANSPARENT);

    for grouping in [GroupingMode::Color, GroupingMode::Proximity, GroupingMode::Ungrouped] {
        let doc = convert(&grid, &config(grouping, true));
        assert_eq!(doc.elements().len(), 0);
        assert_eq!(doc.gradients().len(), 0);
    }
}

#[test]
fn horizontal_strip_ramp_becomes_linear_gradient() {
    let a = Colour::rgb(255, 0, 0);
    let b = Colour::rgb(0, 0, 255);
    let row: Vec<Colour> = (0..20)
        .map(|x| {
            let t = x as f32 / 19.0;
            Colour::rgb(
                (255.0 * (1.0 - t)).round() as u8,
                0,
                (255.0 * t).round() as u8,
            )
        })
        .collect();
    let grid = PixelGrid::from_rows(&[row]);

    let doc = convert(&grid, &config(GroupingMode::Color, true));

    assert_eq!(doc.elements().len(), 1);
    let FillRef::Gradient(id) = &doc.elements()[0].fill else {
        panic!("expected a gradient fill");
    };
    let def = doc.gradient(id).unwrap();
    assert_eq!(def.id, "gradient_0");
    assert_eq!(def.start, a);
    assert_eq!(def.end, b);
    assert!(def.angle.abs() < 1e-3);
}

#[test]
fn gradient_ids_are_unique_across_document() {
    let mut rows = vec![vec![Colour::TRANSPARENT; 30]; 12];
    for (y, row) in rows.iter_mut().enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let block = x / 10;
            if x % 10 < 8 && y < 10 {
                let v = (x % 10 * 30) as u8;
                *px = Colour::rgb(v, (block * 60) as u8, 255 - v);
            }
        }
    }
    let grid = PixelGrid::from_rows(&rows);

    let doc = convert(&grid, &config(GroupingMode::Color, true));

    assert_eq!(doc.elements().len(), 3);
    let ids: HashSet<&str> = doc.gradients().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), doc.gradients().len());
    for element in doc.elements() {
        assert!((0.0..=1.0).contains(&element.opacity));
        if let FillRef::Gradient(id) = &element.fill {
            assert!(ids.contains(id.as_str()));
        }
    }
}

#[test]
fn conversion_is_reproducible() {
    let mut rows = vec![vec![Colour::TRANSPARENT; 24]; 24];
    for (y, row) in rows.iter_mut().enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            if (x / 6 + y / 6) % 2 == 0 {
                *px = Colour::new((x * 10) as u8, (y * 10) as u8, 90, 200);
            }
        }
    }
    let grid = PixelGrid::from_rows(&rows);

    for grouping in [GroupingMode::Color, GroupingMode::Proximity, GroupingMode::Ungrouped] {
        let cfg = config(grouping, true);
        let first = to_svg(&convert(&grid, &cfg)).to_string();
        let second = to_svg(&convert(&grid, &cfg)).to_string();
        assert_eq!(first, second);
    }
}

#[test]
fn proximity_mode_summary() {
    let mut rows = vec![vec![Colour::TRANSPARENT; 40]; 10];
    for y in 0..4 {
        for x in 0..4 {
            rows[y][x] = Colour::rgb(255, 255, 0);
            rows[y + 5][x + 30] = Colour::rgb(0, 255, 255);
        }
    }
    // Isolated noise pixel.
    rows[9][15] = Colour::rgb(0, 0, 0);
    let grid = PixelGrid::from_rows(&rows);

    let doc = convert(&grid, &config(GroupingMode::Proximity, false));

    insta::assert_json_snapshot!(DocumentSummary::of(&doc), @r###"
    {
      "width": 40,
      "height": 10,
      "polygons": 2,
      "cells": 0,
      "gradients": 0
    }
    "###);
}
