// src/compositor/tests.rs

use super::*;
use crate::surface::{Extent, PixelSurface};

const RED: u32 = 0x00FF_0000;
const GREEN: u32 = 0x0000_FF00;
const BLACK: u32 = 0x0000_0000;
const BACKDROP: u32 = 0x0012_3456;

fn backdrop(width: u32, height: u32) -> Vec<u32> {
    vec![BACKDROP; (width * height) as usize]
}

/// Draws onto a fresh buffer and hands it back for inspection.
fn render(width: u32, height: u32, rects: &[Rect]) -> Vec<u32> {
    let mut pixels = backdrop(width, height);
    let mut surface = PixelSurface::new(&mut pixels, Extent::new(width, height)).unwrap();
    draw_frame(&mut surface, rects);
    pixels
}

fn at(pixels: &[u32], width: u32, x: u32, y: u32) -> u32 {
    pixels[(x + y * width) as usize]
}

fn painted(pixels: &[u32], width: u32) -> Vec<(u32, u32)> {
    pixels
        .iter()
        .enumerate()
        .filter(|(_, p)| **p != BACKDROP)
        .map(|(i, _)| (i as u32 % width, i as u32 / width))
        .collect()
}

#[test]
fn test_empty_rect_list_leaves_surface_untouched() {
    // Contract: no rects, no writes
    let pixels = render(10, 10, &[]);
    assert_eq!(pixels, backdrop(10, 10));
}

#[test]
fn test_rect_inside_surface_paints_its_region_only() {
    let pixels = render(10, 10, &[Rect::new(2, 2, 5, 5, RED)]);

    for y in 0..10 {
        for x in 0..10 {
            let expected = if (2..5).contains(&x) && (2..5).contains(&y) {
                RED
            } else {
                BACKDROP
            };
            assert_eq!(at(&pixels, 10, x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_vertical_scan_uses_x_origin() {
    // Rows start at rect.x (4), not rect.y (1).
    let pixels = render(10, 10, &[Rect::new(4, 1, 6, 8, GREEN)]);

    let expected: Vec<(u32, u32)> = (4..8)
        .flat_map(|y| (4..6).map(move |x| (x, y)))
        .collect();
    let mut got = painted(&pixels, 10);
    got.sort_by_key(|&(x, y)| (y, x));
    assert_eq!(got, expected);
    assert_eq!(at(&pixels, 10, 4, 1), BACKDROP);
}

#[test]
fn test_vertical_scan_uses_x_origin_paints_nothing_when_x_exceeds_height() {
    // Wide, short surface: x = 8 is a valid column but past the last row.
    let pixels = render(20, 5, &[Rect::new(8, 0, 15, 5, RED)]);
    assert!(painted(&pixels, 20).is_empty());
}

#[test]
fn test_rect_at_right_edge_is_scanned_but_paints_nothing() {
    let pixels = render(10, 10, &[Rect::new(10, 0, 20, 20, RED)]);
    assert_eq!(pixels, backdrop(10, 10));
}

#[test]
fn test_rect_on_bottom_edge_is_still_drawn() {
    // Contract: y == height is not skipped; rows start at x, so the rect paints.
    let pixels = render(10, 10, &[Rect::new(2, 10, 5, 5, RED)]);

    let mut got = painted(&pixels, 10);
    got.sort_by_key(|&(x, y)| (y, x));
    let expected: Vec<(u32, u32)> = (2..5)
        .flat_map(|y| (2..5).map(move |x| (x, y)))
        .collect();
    assert_eq!(got, expected);
    assert!(got.iter().all(|&(x, y)| at(&pixels, 10, x, y) == RED));
}

#[test]
fn test_rect_past_edges_is_skipped() {
    let pixels = render(
        10,
        10,
        &[Rect::new(11, 0, 20, 20, RED), Rect::new(0, 11, 20, 20, RED)],
    );
    assert_eq!(pixels, backdrop(10, 10));
}

#[test]
fn test_end_coordinates_are_clipped_to_surface() {
    let pixels = render(6, 6, &[Rect::new(3, 0, 100, 100, RED)]);

    assert_eq!(painted(&pixels, 6).len(), 3 * 3);
    assert_eq!(at(&pixels, 6, 5, 5), RED);
    assert_eq!(at(&pixels, 6, 2, 5), BACKDROP);
}

#[test]
fn test_degenerate_rect_is_a_noop() {
    // End before start on either axis yields an empty range.
    let pixels = render(
        10,
        10,
        &[Rect::new(5, 5, 3, 9, RED), Rect::new(5, 5, 9, 2, RED)],
    );
    assert_eq!(pixels, backdrop(10, 10));
}

#[test]
fn test_later_rect_wins_on_overlap() {
    let pixels = render(
        10,
        10,
        &[Rect::new(1, 1, 6, 6, RED), Rect::new(3, 3, 8, 8, GREEN)],
    );

    assert_eq!(at(&pixels, 10, 1, 1), RED);
    assert_eq!(at(&pixels, 10, 4, 4), GREEN);
    assert_eq!(at(&pixels, 10, 5, 5), GREEN);
    assert_eq!(at(&pixels, 10, 7, 7), GREEN);
}

#[test]
fn test_black_overwrites_painted_pixels() {
    // Contract: zero is an ordinary colour, not a transparent key
    let pixels = render(
        8,
        8,
        &[Rect::new(0, 0, 8, 8, RED), Rect::new(2, 2, 4, 4, BLACK)],
    );

    assert_eq!(at(&pixels, 8, 2, 2), BLACK);
    assert_eq!(at(&pixels, 8, 3, 3), BLACK);
    assert_eq!(at(&pixels, 8, 4, 4), RED);
    assert_eq!(at(&pixels, 8, 0, 0), RED);
}

#[test]
fn test_drawing_twice_is_idempotent() {
    let rects = [
        Rect::new(1, 1, 6, 6, RED),
        Rect::new(3, 0, 9, 9, GREEN),
        Rect::new(0, 0, 2, 2, BLACK),
    ];

    let once = render(10, 10, &rects);

    let mut twice = backdrop(10, 10);
    let mut surface = PixelSurface::new(&mut twice, Extent::new(10, 10)).unwrap();
    draw_frame(&mut surface, &rects);
    draw_frame(&mut surface, &rects);

    assert_eq!(once, twice);
}

#[test]
fn test_draw_on_empty_surface_does_not_panic() {
    let mut pixels: Vec<u32> = Vec::new();
    let mut surface = PixelSurface::new(&mut pixels, Extent::new(0, 0)).unwrap();
    draw_frame(&mut surface, &[Rect::new(0, 0, 10, 10, RED)]);
    assert!(pixels.is_empty());
}

#[test]
fn test_from_origin_size_stores_end_coordinates() {
    let rect = Rect::from_origin_size(20, 20, 80, 180, RED);
    assert_eq!(rect, Rect::new(20, 20, 100, 200, RED));

    let saturated = Rect::from_origin_size(u32::MAX - 1, 0, 10, 10, RED);
    assert_eq!(saturated.width, u32::MAX);
}
