use rh_core::{CellType, CellValue, RehostError, RootDir, Storage, Visibility};

use crate::descriptor::{ClientDescriptor, StateCell};

// Overwrites the client's private static root-directory cell. Must run
// strictly before the client is constructed: the client reads the cell at
// construction or first use, and nothing enforces the ordering structurally.
// Only cells declared directly on the descriptor are considered, never the
// parent's.
pub fn patch_root_dir(descriptor: &ClientDescriptor, root: &RootDir) -> Result<(), RehostError> {
    let matches: Vec<&StateCell> = descriptor
        .declared_cells()
        .iter()
        .filter(|cell| cell.matches(Visibility::Private, Storage::Static, CellType::Directory))
        .collect();

    match matches.as_slice() {
        [] => Err(RehostError::new(
            "PATCH_CELL_NOT_FOUND",
            format!(
                "No private static directory cell declared on \"{}\"; the client layout no longer matches.",
                descriptor.qualified_name
            ),
        )),
        [cell] => {
            log::info!(
                "found root directory cell '{}' on '{}'",
                cell.name(),
                descriptor.qualified_name
            );
            log::info!("using '{}' as client root", root.display());
            cell.force_write(CellValue::Directory(root.as_path().to_path_buf()))
        }
        cells => Err(RehostError::new(
            "PATCH_CELL_AMBIGUOUS",
            format!(
                "Expected one private static directory cell on \"{}\", found {}: [{}].",
                descriptor.qualified_name,
                cells.len(),
                cells
                    .iter()
                    .map(|cell| cell.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::EmbeddableClient;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::sync::Mutex;

    struct NullClient;

    impl EmbeddableClient for NullClient {
        fn set_host(&mut self, _host: Rc<dyn crate::contract::HostContract>) {}
        fn init(&mut self) {}
        fn start(&mut self) {}
        fn stop(&mut self) {}
        fn destroy(&mut self) {}
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn set_visible(&mut self, _visible: bool) {}
        fn is_visible(&self) -> bool {
            false
        }
    }

    fn construct_null() -> Result<Box<dyn EmbeddableClient>, RehostError> {
        Ok(Box::new(NullClient))
    }

    macro_rules! directory_cell_storage {
        ($storage:ident, $writer:ident, $reader:ident) => {
            static $storage: Mutex<Option<PathBuf>> = Mutex::new(None);

            fn $writer(value: CellValue) -> Result<(), RehostError> {
                let Some(path) = value.as_directory() else {
                    return Err(RehostError::new(
                        "TEST_CELL_TYPE",
                        format!("expected a directory value, got {}", value.type_name()),
                    ));
                };
                let mut slot = $storage.lock().expect("cell lock");
                *slot = Some(path.to_path_buf());
                Ok(())
            }

            fn $reader() -> Option<CellValue> {
                let slot = $storage.lock().expect("cell lock");
                slot.clone().map(CellValue::Directory)
            }
        };
    }

    directory_cell_storage!(SINGLE_ROOT, write_single, read_single);
    directory_cell_storage!(AMBIG_A, write_ambig_a, read_ambig_a);
    directory_cell_storage!(AMBIG_B, write_ambig_b, read_ambig_b);
    directory_cell_storage!(PARENT_ROOT, write_parent, read_parent);

    fn text_write(_value: CellValue) -> Result<(), RehostError> {
        Err(RehostError::new("TEST_CELL_TYPE", "text cell is not patched"))
    }

    fn text_read() -> Option<CellValue> {
        None
    }

    static PATCHABLE: ClientDescriptor = ClientDescriptor {
        qualified_name: "legacy.game.Patchable",
        parent: None,
        cells: &[
            // decoys with one signature axis off each
            StateCell::new(
                "save_slot_label",
                Visibility::Private,
                Storage::Static,
                CellType::Text,
                text_write,
                text_read,
            ),
            StateCell::new(
                "shared_root",
                Visibility::Public,
                Storage::Static,
                CellType::Directory,
                write_ambig_a,
                read_ambig_a,
            ),
            StateCell::new(
                "instance_root",
                Visibility::Private,
                Storage::Instance,
                CellType::Directory,
                write_ambig_b,
                read_ambig_b,
            ),
            StateCell::new(
                "game_root",
                Visibility::Private,
                Storage::Static,
                CellType::Directory,
                write_single,
                read_single,
            ),
        ],
        construct: construct_null,
    };

    static NO_CELLS: ClientDescriptor = ClientDescriptor {
        qualified_name: "legacy.game.NoCells",
        parent: None,
        cells: &[StateCell::new(
            "title",
            Visibility::Private,
            Storage::Static,
            CellType::Text,
            text_write,
            text_read,
        )],
        construct: construct_null,
    };

    static AMBIGUOUS: ClientDescriptor = ClientDescriptor {
        qualified_name: "legacy.game.Ambiguous",
        parent: None,
        cells: &[
            StateCell::new(
                "root_a",
                Visibility::Private,
                Storage::Static,
                CellType::Directory,
                write_ambig_a,
                read_ambig_a,
            ),
            StateCell::new(
                "root_b",
                Visibility::Private,
                Storage::Static,
                CellType::Directory,
                write_ambig_b,
                read_ambig_b,
            ),
        ],
        construct: construct_null,
    };

    static PARENT: ClientDescriptor = ClientDescriptor {
        qualified_name: "legacy.game.ParentClient",
        parent: None,
        cells: &[StateCell::new(
            "game_root",
            Visibility::Private,
            Storage::Static,
            CellType::Directory,
            write_parent,
            read_parent,
        )],
        construct: construct_null,
    };

    static CHILD: ClientDescriptor = ClientDescriptor {
        qualified_name: "legacy.game.ChildClient",
        parent: Some(&PARENT),
        cells: &[],
        construct: construct_null,
    };

    #[test]
    fn patches_the_single_matching_cell_and_value_reads_back() {
        let root = RootDir::new("/srv/patchable-root").expect("root");
        patch_root_dir(&PATCHABLE, &root).expect("patch should pass");

        let value = PATCHABLE.declared_cells()[3]
            .read()
            .expect("cell should hold a value after patching");
        assert_eq!(
            value.as_directory(),
            Some(std::path::Path::new("/srv/patchable-root"))
        );
    }

    #[test]
    fn zero_matches_fails_and_leaves_state_unmodified() {
        let root = RootDir::new("/srv/never-written").expect("root");
        let error = patch_root_dir(&NO_CELLS, &root).expect_err("no matching cell should fail");
        assert_eq!(error.code, "PATCH_CELL_NOT_FOUND");
        assert_eq!(NO_CELLS.declared_cells()[0].read(), None);
    }

    #[test]
    fn multiple_matches_fail_fast_without_writing() {
        let root = RootDir::new("/srv/ambiguous-root").expect("root");
        let error = patch_root_dir(&AMBIGUOUS, &root).expect_err("ambiguity should fail");
        assert_eq!(error.code, "PATCH_CELL_AMBIGUOUS");
        assert!(error.message.contains("root_a"));
        assert!(error.message.contains("root_b"));
        for cell in AMBIGUOUS.declared_cells() {
            let unchanged = match cell.read() {
                None => true,
                Some(value) => value.as_directory()
                    != Some(std::path::Path::new("/srv/ambiguous-root")),
            };
            assert!(unchanged, "cell '{}' must not be written", cell.name());
        }
    }

    #[test]
    fn inherited_cells_are_not_considered() {
        let root = RootDir::new("/srv/child-root").expect("root");
        let error = patch_root_dir(&CHILD, &root).expect_err("child declares nothing");
        assert_eq!(error.code, "PATCH_CELL_NOT_FOUND");
        let parent_cell = &PARENT.declared_cells()[0];
        let untouched = match parent_cell.read() {
            None => true,
            Some(value) => value.as_directory() != Some(std::path::Path::new("/srv/child-root")),
        };
        assert!(untouched, "parent cell must not be written through the child");
    }
}
