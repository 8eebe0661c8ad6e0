// src/catalog.rs

//! Cache-and-refetch layer over the resource clients.
//!
//! Each resource family is cached after its first fetch; per-course and
//! per-subject lists are keyed by id. Mutations proxy to the backend and,
//! only on success, drop the touched family so the next read refetches.
//! There are no optimistic updates: the cache never changes before the
//! backend confirms.

use std::collections::HashMap;

use crate::api::{
    ApiClient, CoursesApi, MaterialsApi, SemestersApi, SubjectsApi, YearsApi,
};
use crate::error::Result;
use crate::models::{
    Course, CourseData, CourseDetails, Material, MaterialData, Semester, SemesterData, Subject,
    SubjectData, Year, YearData,
};

/// Resource families sharing one invalidation scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFamily {
    Years,
    Semesters,
    Courses,
    Subjects,
    Materials,
}

/// Immutable joint snapshot of the academic-structure families, ready for
/// the derivation core.
#[derive(Debug, Clone)]
pub struct AcademicSnapshot {
    pub years: Vec<Year>,
    pub semesters: Vec<Semester>,
    pub subjects: Vec<Subject>,
    pub materials: Vec<Material>,
}

/// Transient per-page cache over the typed resource clients.
pub struct Catalog<'a> {
    client: &'a ApiClient,
    years: Option<Vec<Year>>,
    semesters: Option<Vec<Semester>>,
    courses: Option<Vec<Course>>,
    subjects: Option<Vec<Subject>>,
    materials: Option<Vec<Material>>,
    subjects_by_course: HashMap<String, Vec<Subject>>,
    materials_by_course: HashMap<String, Vec<Material>>,
    materials_by_subject: HashMap<String, Vec<Material>>,
}

impl<'a> Catalog<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            years: None,
            semesters: None,
            courses: None,
            subjects: None,
            materials: None,
            subjects_by_course: HashMap::new(),
            materials_by_course: HashMap::new(),
            materials_by_subject: HashMap::new(),
        }
    }

    /// Drop every cache entry belonging to a family.
    pub fn invalidate(&mut self, family: ResourceFamily) {
        match family {
            ResourceFamily::Years => self.years = None,
            ResourceFamily::Semesters => self.semesters = None,
            ResourceFamily::Courses => self.courses = None,
            ResourceFamily::Subjects => {
                self.subjects = None;
                self.subjects_by_course.clear();
            }
            ResourceFamily::Materials => {
                self.materials = None;
                self.materials_by_course.clear();
                self.materials_by_subject.clear();
            }
        }
    }

    // --- Reads (fetch on miss) ---

    pub async fn years(&mut self) -> Result<Vec<Year>> {
        if self.years.is_none() {
            self.years = Some(YearsApi::new(self.client).list().await?);
        }
        Ok(self.years.clone().expect("years cache just filled"))
    }

    pub async fn semesters(&mut self) -> Result<Vec<Semester>> {
        if self.semesters.is_none() {
            self.semesters = Some(SemestersApi::new(self.client).list().await?);
        }
        Ok(self.semesters.clone().expect("semesters cache just filled"))
    }

    pub async fn courses(&mut self) -> Result<Vec<Course>> {
        if self.courses.is_none() {
            self.courses = Some(CoursesApi::new(self.client).list().await?);
        }
        Ok(self.courses.clone().expect("courses cache just filled"))
    }

    pub async fn subjects(&mut self) -> Result<Vec<Subject>> {
        if self.subjects.is_none() {
            self.subjects = Some(SubjectsApi::new(self.client).list().await?);
        }
        Ok(self.subjects.clone().expect("subjects cache just filled"))
    }

    pub async fn materials(&mut self) -> Result<Vec<Material>> {
        if self.materials.is_none() {
            self.materials = Some(MaterialsApi::new(self.client).list().await?);
        }
        Ok(self.materials.clone().expect("materials cache just filled"))
    }

    pub async fn subjects_by_course(&mut self, course_id: &str) -> Result<Vec<Subject>> {
        if !self.subjects_by_course.contains_key(course_id) {
            let subjects = SubjectsApi::new(self.client).by_course(course_id).await?;
            self.subjects_by_course
                .insert(course_id.to_string(), subjects);
        }
        Ok(self.subjects_by_course[course_id].clone())
    }

    pub async fn materials_by_course(&mut self, course_id: &str) -> Result<Vec<Material>> {
        if !self.materials_by_course.contains_key(course_id) {
            let materials = MaterialsApi::new(self.client).by_course(course_id).await?;
            self.materials_by_course
                .insert(course_id.to_string(), materials);
        }
        Ok(self.materials_by_course[course_id].clone())
    }

    pub async fn materials_by_subject(&mut self, subject_id: &str) -> Result<Vec<Material>> {
        if !self.materials_by_subject.contains_key(subject_id) {
            let materials = MaterialsApi::new(self.client).by_subject(subject_id).await?;
            self.materials_by_subject
                .insert(subject_id.to_string(), materials);
        }
        Ok(self.materials_by_subject[subject_id].clone())
    }

    /// Course details are always fetched fresh: the nested payload spans
    /// several families and is cheap to re-request per page.
    pub async fn course_details(&self, course_id: &str) -> Result<CourseDetails> {
        CoursesApi::new(self.client).details(course_id).await
    }

    /// Fetch the four academic-structure families concurrently and refresh
    /// their caches. With a course id, subjects and materials are scoped to
    /// that course.
    pub async fn academic_snapshot(&mut self, course_id: Option<&str>) -> Result<AcademicSnapshot> {
        let subjects_api = SubjectsApi::new(self.client);
        let materials_api = MaterialsApi::new(self.client);

        let subjects_fut = async {
            match course_id {
                Some(c) => subjects_api.by_course(c).await,
                None => subjects_api.list().await,
            }
        };
        let materials_fut = async {
            match course_id {
                Some(c) => materials_api.by_course(c).await,
                None => materials_api.list().await,
            }
        };

        let years_api = YearsApi::new(self.client);
        let semesters_api = SemestersApi::new(self.client);
        let (years, semesters, subjects, materials) = futures::try_join!(
            years_api.list(),
            semesters_api.list(),
            subjects_fut,
            materials_fut,
        )?;

        self.years = Some(years.clone());
        self.semesters = Some(semesters.clone());
        match course_id {
            Some(c) => {
                self.subjects_by_course.insert(c.to_string(), subjects.clone());
                self.materials_by_course
                    .insert(c.to_string(), materials.clone());
            }
            None => {
                self.subjects = Some(subjects.clone());
                self.materials = Some(materials.clone());
            }
        }

        Ok(AcademicSnapshot {
            years,
            semesters,
            subjects,
            materials,
        })
    }

    // --- Mutations (invalidate on success only) ---

    pub async fn create_year(&mut self, data: &YearData) -> Result<()> {
        YearsApi::new(self.client).create(data).await?;
        self.invalidate(ResourceFamily::Years);
        Ok(())
    }

    pub async fn update_year(&mut self, id: &str, data: &YearData) -> Result<()> {
        YearsApi::new(self.client).update(id, data).await?;
        self.invalidate(ResourceFamily::Years);
        Ok(())
    }

    pub async fn delete_year(&mut self, id: &str) -> Result<()> {
        YearsApi::new(self.client).delete(id).await?;
        self.invalidate(ResourceFamily::Years);
        Ok(())
    }

    pub async fn create_semester(&mut self, data: &SemesterData) -> Result<()> {
        SemestersApi::new(self.client).create(data).await?;
        self.invalidate(ResourceFamily::Semesters);
        Ok(())
    }

    pub async fn update_semester(&mut self, id: &str, data: &SemesterData) -> Result<()> {
        SemestersApi::new(self.client).update(id, data).await?;
        self.invalidate(ResourceFamily::Semesters);
        Ok(())
    }

    pub async fn delete_semester(&mut self, id: &str) -> Result<()> {
        SemestersApi::new(self.client).delete(id).await?;
        self.invalidate(ResourceFamily::Semesters);
        Ok(())
    }

    pub async fn create_course(&mut self, data: &CourseData) -> Result<Course> {
        let course = CoursesApi::new(self.client).create(data).await?;
        self.invalidate(ResourceFamily::Courses);
        Ok(course)
    }

    pub async fn update_course(&mut self, id: &str, data: &CourseData) -> Result<Course> {
        let course = CoursesApi::new(self.client).update(id, data).await?;
        self.invalidate(ResourceFamily::Courses);
        Ok(course)
    }

    pub async fn delete_course(&mut self, id: &str) -> Result<()> {
        CoursesApi::new(self.client).delete(id).await?;
        self.invalidate(ResourceFamily::Courses);
        Ok(())
    }

    pub async fn create_subject(&mut self, data: &SubjectData) -> Result<Subject> {
        let subject = SubjectsApi::new(self.client).create(data).await?;
        self.invalidate(ResourceFamily::Subjects);
        Ok(subject)
    }

    pub async fn update_subject(&mut self, id: &str, data: &SubjectData) -> Result<Subject> {
        let subject = SubjectsApi::new(self.client).update(id, data).await?;
        self.invalidate(ResourceFamily::Subjects);
        Ok(subject)
    }

    pub async fn delete_subject(&mut self, id: &str) -> Result<()> {
        SubjectsApi::new(self.client).delete(id).await?;
        self.invalidate(ResourceFamily::Subjects);
        Ok(())
    }

    pub async fn create_material(&mut self, data: &MaterialData) -> Result<Material> {
        let material = MaterialsApi::new(self.client).create(data).await?;
        self.invalidate(ResourceFamily::Materials);
        Ok(material)
    }

    pub async fn delete_material(&mut self, id: &str) -> Result<()> {
        MaterialsApi::new(self.client).delete(id).await?;
        self.invalidate(ResourceFamily::Materials);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiConfig;

    fn seeded_catalog(client: &ApiClient) -> Catalog<'_> {
        let mut catalog = Catalog::new(client);
        catalog.years = Some(Vec::new());
        catalog.semesters = Some(Vec::new());
        catalog.subjects = Some(Vec::new());
        catalog.materials = Some(Vec::new());
        catalog.subjects_by_course.insert("c1".into(), Vec::new());
        catalog.materials_by_course.insert("c1".into(), Vec::new());
        catalog.materials_by_subject.insert("su1".into(), Vec::new());
        catalog
    }

    #[test]
    fn invalidation_is_family_scoped() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let mut catalog = seeded_catalog(&client);

        catalog.invalidate(ResourceFamily::Years);
        assert!(catalog.years.is_none());
        assert!(catalog.semesters.is_some());

        catalog.invalidate(ResourceFamily::Subjects);
        assert!(catalog.subjects.is_none());
        assert!(catalog.subjects_by_course.is_empty());
        // materials untouched
        assert!(catalog.materials.is_some());
        assert!(!catalog.materials_by_subject.is_empty());
    }

    #[test]
    fn material_invalidation_clears_keyed_lists() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let mut catalog = seeded_catalog(&client);

        catalog.invalidate(ResourceFamily::Materials);
        assert!(catalog.materials.is_none());
        assert!(catalog.materials_by_course.is_empty());
        assert!(catalog.materials_by_subject.is_empty());
    }
}
