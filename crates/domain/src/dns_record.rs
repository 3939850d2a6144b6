pub mod record_type;
pub mod resource_record;
pub mod rows;

pub use record_type::{RecordClass, RecordType};
pub use resource_record::{RecordData, ResourceRecord};
pub use rows::{ARow, AaaaRow, CaaRow, CnameRow, MxRow, NsRow, SoaRow, SrvRow, TxtRow};
