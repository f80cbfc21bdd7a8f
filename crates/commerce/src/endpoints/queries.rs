//! GraphQL documents for product operations.

pub(crate) const CREATE_PRODUCT: &str = r#"
mutation createProduct($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      title
      metafields(first: 250) {
        edges { node { namespace key value type description } }
      }
    }
    userErrors { field message }
  }
}
"#;

pub(crate) const GET_PRODUCT: &str = r#"
query getProduct($id: ID!) {
  product(id: $id) {
    id
    title
    metafields(first: 250) {
      edges { node { namespace key value } }
    }
    images(first: 10) {
      edges { node { id src altText } }
    }
    options { id name values }
  }
}
"#;

pub(crate) const UPDATE_PRODUCT: &str = r#"
mutation updateProduct($id: ID!, $input: ProductInput!) {
  productUpdate(id: $id, input: $input) {
    product {
      id
      title
      metafields(first: 250) {
        edges { node { namespace key value type description } }
      }
    }
    userErrors { field message }
  }
}
"#;

pub(crate) const DELETE_PRODUCT: &str = r#"
mutation deleteProduct($id: ID!) {
  productDelete(id: $id) {
    deletedProductId
    userErrors { field message }
  }
}
"#;
