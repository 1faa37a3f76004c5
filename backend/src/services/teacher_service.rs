//! Teacher lookups. Teachers are read-only through the API.

use crate::database::models::Teacher;
use crate::errors::ServiceResult;
use crate::repositories::TeacherStore;

pub struct TeacherService<'a> {
    teachers: &'a dyn TeacherStore,
}

impl<'a> TeacherService<'a> {
    pub fn new(teachers: &'a dyn TeacherStore) -> Self {
        Self { teachers }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Teacher>> {
        Ok(self.teachers.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Option<Teacher>> {
        Ok(self.teachers.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::in_memory::InMemoryTeacherStore;

    #[tokio::test]
    async fn test_find_teachers() {
        let store = InMemoryTeacherStore::default()
            .with_teacher(1, "Margot", "DELAHAYE")
            .with_teacher(2, "Hélène", "THIERCELIN");
        let service = TeacherService::new(&store);

        assert_eq!(service.find_all().await.unwrap().len(), 2);
        assert_eq!(
            service.find_by_id(2).await.unwrap().unwrap().last_name,
            "THIERCELIN"
        );
        assert!(service.find_by_id(3).await.unwrap().is_none());
    }
}
