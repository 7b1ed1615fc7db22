use rh_core::{CellType, CellValue, RehostError, Storage, Visibility};

use crate::contract::EmbeddableClient;

pub type CellWriter = fn(CellValue) -> Result<(), RehostError>;
pub type CellReader = fn() -> Option<CellValue>;
pub type ClientConstructor = fn() -> Result<Box<dyn EmbeddableClient>, RehostError>;

// One internal slot of a client type. The writer reaches storage the
// client never exposes publicly; it stays crate-private so the patcher is
// the only path to it.
#[derive(Debug)]
pub struct StateCell {
    name: &'static str,
    visibility: Visibility,
    storage: Storage,
    cell_type: CellType,
    writer: CellWriter,
    reader: CellReader,
}

impl StateCell {
    pub const fn new(
        name: &'static str,
        visibility: Visibility,
        storage: Storage,
        cell_type: CellType,
        writer: CellWriter,
        reader: CellReader,
    ) -> Self {
        Self {
            name,
            visibility,
            storage,
            cell_type,
            writer,
            reader,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn matches(&self, visibility: Visibility, storage: Storage, cell_type: CellType) -> bool {
        self.visibility == visibility && self.storage == storage && self.cell_type == cell_type
    }

    pub fn read(&self) -> Option<CellValue> {
        (self.reader)()
    }

    pub(crate) fn force_write(&self, value: CellValue) -> Result<(), RehostError> {
        (self.writer)(value)
    }
}

// Structural description of one registered client type: its qualified
// name, the cells declared directly on it, an optional parent type, and
// the constructor.
#[derive(Debug)]
pub struct ClientDescriptor {
    pub qualified_name: &'static str,
    pub parent: Option<&'static ClientDescriptor>,
    pub cells: &'static [StateCell],
    pub construct: ClientConstructor,
}

impl ClientDescriptor {
    pub fn declared_cells(&self) -> &[StateCell] {
        self.cells
    }
}
