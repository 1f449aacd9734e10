use dtolink_utils::case::strip_suffix_ignore_ascii_case;

/// DTO name suffixes stripped to find the conventional mutator name, tried
/// in order. The first that matches wins.
pub const DTO_NAME_SUFFIXES: [&str; 3] = ["ViewModel", "Dto", "VM"];

/// Conventional mutator name for a DTO: its name minus the first matching
/// suffix (ASCII case-insensitive). A name that is nothing but a suffix is
/// kept whole.
#[must_use]
pub fn method_name_from_dto(dto_name: &str) -> &str {
    DTO_NAME_SUFFIXES
        .iter()
        .find_map(|suffix| strip_suffix_ignore_ascii_case(dto_name, suffix))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(dto_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_suffixes_are_stripped() {
        assert_eq!(method_name_from_dto("OrderDto"), "Order");
        assert_eq!(method_name_from_dto("CustomerVM"), "Customer");
        assert_eq!(method_name_from_dto("InvoiceViewModel"), "Invoice");
        assert_eq!(method_name_from_dto("orderdto"), "order");
    }

    #[test]
    fn first_suffix_in_order_wins() {
        // "ViewModel" is tried before "VM"; neither applies to "ModelDto"
        assert_eq!(method_name_from_dto("ModelDto"), "Model");
        assert_eq!(method_name_from_dto("StatusViewModel"), "Status");
    }

    #[test]
    fn unsuffixed_and_bare_names_are_kept() {
        assert_eq!(method_name_from_dto("Order"), "Order");
        assert_eq!(method_name_from_dto("Dto"), "Dto");
        assert_eq!(method_name_from_dto(""), "");
    }
}
