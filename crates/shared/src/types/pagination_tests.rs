use super::pagination::*;
use rstest::rstest;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.page_size, 20);
}

#[rstest]
#[case(1, 1, true)]
#[case(1, 50, true)]
#[case(1, 51, false)]
#[case(1, 0, false)]
#[case(0, 20, false)]
fn test_page_request_bounds(#[case] page: u32, #[case] page_size: u32, #[case] valid: bool) {
    assert_eq!(PageRequest::new(page, page_size).is_some(), valid);
}

#[test]
fn test_page_request_offset() {
    let request = PageRequest::new(1, 20).unwrap();
    assert_eq!(request.offset(), 0);
    assert_eq!(request.index(), 0);

    let request = PageRequest::new(3, 20).unwrap();
    assert_eq!(request.offset(), 40);
    assert_eq!(request.index(), 2);
    assert_eq!(request.limit(), 20);
}

#[test]
fn test_page_response_new() {
    let data = vec![1, 2, 3];
    let response = PageResponse::new(data.clone(), PageRequest::new(1, 10).unwrap(), 3);

    assert_eq!(response.data, data);
    assert_eq!(response.meta.page, 1);
    assert_eq!(response.meta.page_size, 10);
    assert_eq!(response.meta.total, 3);
    assert_eq!(response.meta.total_pages, 1);
}

#[test]
fn test_page_response_pagination() {
    // 25 items, 10 per page -> 3 pages
    let response: PageResponse<i32> =
        PageResponse::new(vec![], PageRequest::new(1, 10).unwrap(), 25);
    assert_eq!(response.meta.total_pages, 3);
}

#[test]
fn test_page_response_empty() {
    let response: PageResponse<i32> = PageResponse::new(vec![], PageRequest::default(), 0);
    assert_eq!(response.meta.total_pages, 1);
}

#[test]
fn test_page_meta_serializes_camel_case() {
    let response: PageResponse<i32> = PageResponse::new(vec![7], PageRequest::default(), 1);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["meta"]["pageSize"], 20);
    assert_eq!(json["meta"]["totalPages"], 1);
}

#[test]
fn test_page_response_map() {
    let response = PageResponse::new(vec![1, 2], PageRequest::default(), 2).map(|n| n * 10);
    assert_eq!(response.data, vec![10, 20]);
    assert_eq!(response.meta.total, 2);
}

#[test]
fn test_from_vec_cuts_requested_page() {
    let items: Vec<u32> = (1..=45).collect();
    let page = PageResponse::from_vec(items, PageRequest::new(3, 20).unwrap());
    assert_eq!(page.data, vec![41, 42, 43, 44, 45]);
    assert_eq!(page.meta.total, 45);
    assert_eq!(page.meta.total_pages, 3);
}

#[test]
fn test_from_vec_past_the_end_is_empty() {
    let page = PageResponse::from_vec(vec![1, 2, 3], PageRequest::new(2, 10).unwrap());
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 3);
}
