#[cfg(test)]
mod iterator_tests {
    use crate::{tests::utils::TEST_IMAGE_SIZE, utils::iterator::GridIterator};

    fn missing_pixel(data: &[bool]) -> bool {
        let missed_pixel = data.iter().position(|visited| !visited);
        if let Some(pixel) = missed_pixel {
            let x = pixel % TEST_IMAGE_SIZE;
            let y = pixel / TEST_IMAGE_SIZE;
            println!("missed pixel {}: {} {}", pixel, x, y);
        }
        missed_pixel.is_some()
    }

    #[test]
    fn test_grid_iterator_visits_indices() {
        let mut visit = vec![false; TEST_IMAGE_SIZE * TEST_IMAGE_SIZE];
        for (x, y, idx) in GridIterator::new(TEST_IMAGE_SIZE, TEST_IMAGE_SIZE) {
            assert_eq!(
                TEST_IMAGE_SIZE * y + x,
                idx,
                "1D pixel index missmatches 2D coordinates"
            );
            assert!(!visit[idx], "Pixel visited twice");
            visit[idx] = true;
        }
        assert!(!missing_pixel(&visit), "Pixel not visited");
    }

    #[test]
    fn test_grid_iterator_is_row_major() {
        let visited: Vec<(usize, usize)> = GridIterator::new(3, 2).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(visited, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_grid_iterator_len() {
        let mut grid = GridIterator::new(4, 5);
        assert_eq!(grid.len(), 20);
        grid.nth(6);
        assert_eq!(grid.len(), 13);
        assert_eq!(grid.count(), 13);
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        assert_eq!(GridIterator::new(0, 7).count(), 0);
        assert_eq!(GridIterator::new(7, 0).len(), 0);
        assert_eq!(GridIterator::new(0, 7).len(), 0);
    }
}
