//! Read endpoints backing the order filters and the cart

use super::DineboxApi;
use crate::ClientResult;
use crate::http::HttpClient;
use shared::models::{Branch, BranchListItem, MenuItem, OptionType, User};

impl<C: HttpClient> DineboxApi<C> {
    pub async fn branches(&self) -> ClientResult<Vec<Branch>> {
        self.get_list("/api/Branches/GetAll").await
    }

    /// Id/name pairs for the branch picker
    pub async fn branch_list(&self) -> ClientResult<Vec<BranchListItem>> {
        self.get_list("/api/Branches/GetList").await
    }

    pub async fn users(&self) -> ClientResult<Vec<User>> {
        self.get_list("/api/Users/GetAll").await
    }

    pub async fn menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.get_list("/api/MenuItems/GetAll").await
    }

    pub async fn option_types(&self) -> ClientResult<Vec<OptionType>> {
        self.get_list("/api/OptionTypes/GetAll").await
    }
}
